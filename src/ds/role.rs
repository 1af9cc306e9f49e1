/// Body shared by role request and role reply (1.2 and later).
///
/// The switch compares `generation_id` against the last master election it
/// saw and rejects stale requests.
#[derive(Debug, PartialEq, Clone)]
pub struct Role {
    pub role: ControllerRole,
    pub generation_id: u64,
}

#[derive(Primitive, PartialEq, Eq, Debug, Clone, Copy)]
pub enum ControllerRole {
    /// Query only, the switch reports the current role.
    NoChange = 0,
    Equal = 1,
    /// Exclusive write access. Any previous master becomes slave.
    Master = 2,
    /// Receives no asynchronous messages except port status.
    Slave = 3,
}

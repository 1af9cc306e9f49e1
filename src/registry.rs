//! Serializer lookup.
//!
//! A [`RegistryBuilder`] collects the encoders for messages, sub-structures
//! and vendor extensions, then freezes them into a [`SerializerRegistry`].
//! Encoders receive the registry as an argument whenever they run, so nested
//! codecs (match entries, action lists, experimenter bodies) are resolved
//! through the same table. A built registry is immutable and `Send + Sync`.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::ds::OfMsg;
use crate::err::*;
use crate::header::{Type, Version};

#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub struct MessageTypeKey {
    pub version: Version,
    pub ttype: Type,
}

impl MessageTypeKey {
    pub fn new(version: Version, ttype: Type) -> Self {
        MessageTypeKey { version, ttype }
    }
}

/// Families of type-coded sub-structures.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum CodecKind {
    Match,
    MatchEntry,
    Action,
    Instruction,
    MeterBand,
    QueueProperty,
}

/// Sub-structure codec, `code` is the wire type code of the element.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub struct CodecKey {
    pub version: Version,
    pub kind: CodecKind,
    pub code: u32,
}

impl CodecKey {
    pub fn new(version: Version, kind: CodecKind, code: u32) -> Self {
        CodecKey {
            version,
            kind,
            code,
        }
    }
}

/// Places where a vendor body can appear. Each one is its own key space.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum ExperimenterSpace {
    Message,
    MultipartRequest,
    MultipartReply,
    Action,
    Instruction,
    MatchEntry,
    MeterBand,
    TableFeatureProperty,
    QueueProperty,
    Error,
}

#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub struct ExperimenterKey {
    pub version: Version,
    pub space: ExperimenterSpace,
    pub experimenter_id: u32,
    /// `None` where the structure carries no experimenter type.
    pub subtype: Option<u32>,
}

impl ExperimenterKey {
    pub fn new(
        version: Version,
        space: ExperimenterSpace,
        experimenter_id: u32,
        subtype: Option<u32>,
    ) -> Self {
        ExperimenterKey {
            version,
            space,
            experimenter_id,
            subtype,
        }
    }
}

#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum SerializerKey {
    Message(MessageTypeKey),
    Codec(CodecKey),
    Experimenter(ExperimenterKey),
}

impl From<MessageTypeKey> for SerializerKey {
    fn from(key: MessageTypeKey) -> Self {
        SerializerKey::Message(key)
    }
}

impl From<CodecKey> for SerializerKey {
    fn from(key: CodecKey) -> Self {
        SerializerKey::Codec(key)
    }
}

impl From<ExperimenterKey> for SerializerKey {
    fn from(key: ExperimenterKey) -> Self {
        SerializerKey::Experimenter(key)
    }
}

impl fmt::Display for SerializerKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SerializerKey::Message(key) => write!(f, "({:?}, {:?})", key.version, key.ttype),
            SerializerKey::Codec(key) => write!(
                f,
                "({:?}, {:?}, {:#x})",
                key.version, key.kind, key.code
            ),
            SerializerKey::Experimenter(key) => match key.subtype {
                Some(subtype) => write!(
                    f,
                    "({:?}, {:?}, experimenter {:#x}, subtype {})",
                    key.version, key.space, key.experimenter_id, subtype
                ),
                None => write!(
                    f,
                    "({:?}, {:?}, experimenter {:#x})",
                    key.version, key.space, key.experimenter_id
                ),
            },
        }
    }
}

/// Writes one `T`, including its own type and length fields.
pub trait OfSerializer<T>: Send + Sync {
    fn serialize(&self, item: &T, out: &mut Vec<u8>, registry: &SerializerRegistry) -> Result<()>;
}

/// Writes only the type and length header of a `T`, used by the id lists of
/// table features.
pub trait HeaderSerializer<T>: Send + Sync {
    fn serialize_header(&self, item: &T, out: &mut Vec<u8>) -> Result<()>;
}

type Slot = Box<dyn Any + Send + Sync>;

pub struct RegistryBuilder {
    serializers: HashMap<SerializerKey, Slot>,
    header_serializers: HashMap<SerializerKey, Slot>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        RegistryBuilder::new()
    }
}

impl RegistryBuilder {
    /// An empty builder. See `ser::registry_builder` for one holding the
    /// standard codecs.
    pub fn new() -> Self {
        RegistryBuilder {
            serializers: HashMap::new(),
            header_serializers: HashMap::new(),
        }
    }

    pub fn register<T, S>(self, key: impl Into<SerializerKey>, serializer: S) -> Self
    where
        T: 'static,
        S: OfSerializer<T> + 'static,
    {
        let shared: Arc<dyn OfSerializer<T>> = Arc::new(serializer);
        self.register_shared(key, shared)
    }

    /// Registers a message factory under `(version, ttype)`.
    pub fn register_message<S>(self, version: Version, ttype: Type, serializer: S) -> Self
    where
        S: OfSerializer<OfMsg> + 'static,
    {
        self.register::<OfMsg, S>(MessageTypeKey::new(version, ttype), serializer)
    }

    /// Binds an already shared serializer, e.g. one instance for many codes.
    pub fn register_shared<T: 'static>(
        mut self,
        key: impl Into<SerializerKey>,
        serializer: Arc<dyn OfSerializer<T>>,
    ) -> Self {
        let key = key.into();
        if self.serializers.insert(key, Box::new(serializer)).is_some() {
            warn!("Serializer for {} replaced", key);
        }
        self
    }

    pub fn register_header<T, S>(mut self, key: impl Into<SerializerKey>, serializer: S) -> Self
    where
        T: 'static,
        S: HeaderSerializer<T> + 'static,
    {
        let key = key.into();
        let shared: Arc<dyn HeaderSerializer<T>> = Arc::new(serializer);
        if self
            .header_serializers
            .insert(key, Box::new(shared))
            .is_some()
        {
            warn!("Header serializer for {} replaced", key);
        }
        self
    }

    pub fn build(self) -> SerializerRegistry {
        debug!(
            "Serializer registry built with {} serializers and {} header serializers",
            self.serializers.len(),
            self.header_serializers.len()
        );
        SerializerRegistry {
            serializers: self.serializers,
            header_serializers: self.header_serializers,
        }
    }
}

pub struct SerializerRegistry {
    serializers: HashMap<SerializerKey, Slot>,
    header_serializers: HashMap<SerializerKey, Slot>,
}

impl fmt::Debug for SerializerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SerializerRegistry")
            .field("serializers", &self.serializers.len())
            .field("header_serializers", &self.header_serializers.len())
            .finish()
    }
}

impl SerializerRegistry {
    /// Builder pre-loaded with the OpenFlow 1.0 and 1.3 codecs.
    pub fn builder() -> RegistryBuilder {
        crate::ser::registry_builder()
    }

    pub fn contains(&self, key: impl Into<SerializerKey>) -> bool {
        self.serializers.contains_key(&key.into())
    }

    /// Fails with `NoSerializer` when nothing is bound to `key` or the bound
    /// serializer handles another type.
    pub fn lookup<T: 'static>(&self, key: impl Into<SerializerKey>) -> Result<&dyn OfSerializer<T>> {
        let key = key.into();
        match self
            .serializers
            .get(&key)
            .and_then(|slot| slot.downcast_ref::<Arc<dyn OfSerializer<T>>>())
        {
            Some(serializer) => Ok(serializer.as_ref()),
            None => {
                error!("No serializer registered for {}", key);
                bail!(ErrorKind::NoSerializer(key.to_string()))
            }
        }
    }

    pub fn lookup_header<T: 'static>(
        &self,
        key: impl Into<SerializerKey>,
    ) -> Result<&dyn HeaderSerializer<T>> {
        let key = key.into();
        match self
            .header_serializers
            .get(&key)
            .and_then(|slot| slot.downcast_ref::<Arc<dyn HeaderSerializer<T>>>())
        {
            Some(serializer) => Ok(serializer.as_ref()),
            None => {
                error!("No header serializer registered for {}", key);
                bail!(ErrorKind::NoSerializer(key.to_string()))
            }
        }
    }

    /// Appends `msg` to `out`. On failure `out` is cut back to its previous
    /// length.
    pub fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>) -> Result<()> {
        let start = out.len();
        let key = MessageTypeKey::new(*msg.version(), msg.message_type());
        let result = self
            .lookup::<OfMsg>(key)
            .and_then(|factory| factory.serialize(msg, out, self));
        match result {
            Ok(()) => {
                trace!(
                    "Encoded {:?} for {:?}, xid {}, {} bytes",
                    key.ttype,
                    key.version,
                    msg.xid(),
                    out.len() - start
                );
                Ok(())
            }
            Err(e) => {
                out.truncate(start);
                Err(e)
            }
        }
    }

    pub fn encode(&self, msg: &OfMsg) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.serialize(msg, &mut out)?;
        Ok(out)
    }
}

use crate::header::{Type, Version};

error_chain! {
    types {
        Error, ErrorKind, ResultExt, Result;
    }

    foreign_links {
        Io(::std::io::Error);
    }

    errors {
        InvalidSliceLength(expected: usize, actual: usize, ttype: &'static str) {
            description("Invalid slice length received.")
            display("Expected '{}' but got '{}' bytes for '{}'.", expected, actual, ttype)
        }

        UnknownValue(val: u64, ttype: &'static str) {
            description("Encountered unknown value.")
            display("Encountered unknown value '{}' for type '{}'.", val, ttype)
        }

        IllegalValue(val: u64, ttype: &'static str) {
            description("Encountered illegal value.")
            display("Encountered illegal value '{}' for type '{}'.", val, ttype)
        }

        UnsupportedValue(val: u64, ttype: &'static str) {
            description("Encountered unsupported value.")
            display("Encountered unsupported value '{}' for type '{}'.", val, ttype)
        }

        // `required` is the first version that knows the value, or the last
        // one that still does when the value was removed.
        VersionMismatch(version: Version, required: Version, ttype: &'static str) {
            description("Value is not valid for the protocol version.")
            display("'{}' is not valid for {:?} (valid from/until {:?}).", ttype, version, required)
        }

        NoSerializer(key: String) {
            description("No serializer registered for key.")
            display("No serializer registered for key {}.", key)
        }

        UnexpectedPayload(expected: &'static str, ttype: Type) {
            description("Message body does not match the factory.")
            display("Factory for {:?} expects a '{}' body.", ttype, expected)
        }
    }
}

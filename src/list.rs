//! Serialization of type-coded element lists (actions, instructions, bands,
//! match entries, properties). List order is wire order, and the first
//! element without a registered serializer aborts the whole list.

use crate::err::*;
use crate::registry::{SerializerKey, SerializerRegistry};

pub fn serialize_list<T, K>(
    items: &[T],
    key_maker: K,
    registry: &SerializerRegistry,
    out: &mut Vec<u8>,
) -> Result<()>
where
    T: 'static,
    K: Fn(&T) -> SerializerKey,
{
    for item in items {
        registry
            .lookup::<T>(key_maker(item))?
            .serialize(item, out, registry)?;
    }
    Ok(())
}

/// Like [`serialize_list`] but writes only the element headers.
pub fn serialize_header_list<T, K>(
    items: &[T],
    key_maker: K,
    registry: &SerializerRegistry,
    out: &mut Vec<u8>,
) -> Result<()>
where
    T: 'static,
    K: Fn(&T) -> SerializerKey,
{
    for item in items {
        registry
            .lookup_header::<T>(key_maker(item))?
            .serialize_header(item, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::Version;
    use crate::registry::{CodecKey, CodecKind, HeaderSerializer, OfSerializer, RegistryBuilder};

    struct Byte;

    impl OfSerializer<u8> for Byte {
        fn serialize(&self, item: &u8, out: &mut Vec<u8>, _: &SerializerRegistry) -> Result<()> {
            out.push(*item);
            Ok(())
        }
    }

    impl HeaderSerializer<u8> for Byte {
        fn serialize_header(&self, item: &u8, out: &mut Vec<u8>) -> Result<()> {
            out.extend_from_slice(&[*item, 0]);
            Ok(())
        }
    }

    fn key(item: &u8) -> SerializerKey {
        CodecKey::new(Version::V1_3, CodecKind::Action, (*item % 2) as u32).into()
    }

    #[test]
    fn order_is_preserved() {
        let registry = RegistryBuilder::new()
            .register::<u8, _>(CodecKey::new(Version::V1_3, CodecKind::Action, 0), Byte)
            .register::<u8, _>(CodecKey::new(Version::V1_3, CodecKind::Action, 1), Byte)
            .build();
        let mut out = Vec::new();
        serialize_list(&[3u8, 2, 1], key, &registry, &mut out).unwrap();
        assert_eq!(out, vec![3, 2, 1]);
    }

    #[test]
    fn missing_element_serializer_aborts() {
        let registry = RegistryBuilder::new()
            .register::<u8, _>(CodecKey::new(Version::V1_3, CodecKind::Action, 0), Byte)
            .build();
        let mut out = Vec::new();
        assert!(serialize_list(&[2u8, 3, 4], key, &registry, &mut out).is_err());
        assert_eq!(out, vec![2]);
    }

    #[test]
    fn header_list_uses_header_serializers() {
        let registry = RegistryBuilder::new()
            .register_header::<u8, _>(CodecKey::new(Version::V1_3, CodecKind::Action, 0), Byte)
            .build();
        let mut out = Vec::new();
        serialize_header_list(&[4u8, 6], key, &registry, &mut out).unwrap();
        assert_eq!(out, vec![4, 0, 6, 0]);
        assert!(serialize_list(&[4u8], key, &registry, &mut out).is_err());
    }
}

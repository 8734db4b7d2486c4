use tagwire::{
    decode_from, encode, encode_into, BufferReader, Deserializer, EncoderError, Serializer,
};
use tracing_test::traced_test;

#[test]
#[traced_test]
fn test_encode_and_decode_log_size() {
    let value = (1000u16, -1i8);
    let mut out = Vec::new();
    encode_into(&value, &mut out).unwrap();
    assert!(logs_contain("encoded value size=6"));

    let mut decoded = (0u16, 0i8);
    decode_from(&mut decoded, &mut BufferReader::new(&out)).unwrap();
    assert!(logs_contain("decoded value size=6"));
}

#[test]
#[traced_test]
fn test_deserializer_logs_size() {
    let mut out = Vec::new();
    Serializer::new(&mut out).write(&[7u32; 2]).unwrap();
    assert!(logs_contain("serialized value size=4"));

    let mut deserializer = Deserializer::new(BufferReader::new(&out));
    assert_eq!(deserializer.decode::<[u32; 2]>().unwrap(), [7, 7]);
    assert!(logs_contain("deserialized value size=4"));
}

#[test]
#[traced_test]
fn test_decode_failure_is_logged() {
    let bytes = encode(&(1u8, 2u8, 3u8)).unwrap();
    let mut out = (0u8, 0u8);
    let err = decode_from(&mut out, &mut BufferReader::new(&bytes)).unwrap_err();
    assert!(matches!(err, EncoderError::ContainerSizeMismatch { .. }));
    assert!(logs_contain("decode failed"));
}

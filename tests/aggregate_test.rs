use bytes::Bytes;
use tagwire::{
    decode, decode_from, encode, encoded_size, BufferReader, EncoderError, Encoding, EncodingByte,
    ErrorKind,
};

#[test]
fn test_nested_tuple_wire_format() {
    let value = (0xABu8, (0x1234u16, 0x5678u16));
    let bytes = encode(&value).unwrap();

    #[rustfmt::skip]
    let expected = [
        0xba, 0x02,             // ARRAY, count 2
        0x80, 0xab,             // U8 0xAB
        0xba, 0x02,             // ARRAY, count 2
        0x81, 0x34, 0x12,       // U16 0x1234
        0x81, 0x78, 0x56,       // U16 0x5678
    ];
    assert_eq!(&bytes[..], &expected);

    let mut reader = Bytes::copy_from_slice(&expected);
    let decoded: (u8, (u16, u16)) = decode(&mut reader).unwrap();
    assert_eq!(decoded, value);
    assert!(reader.is_empty());
}

#[test]
fn test_empty_tuple() {
    let bytes = encode(&()).unwrap();
    assert_eq!(&bytes[..], &[0xba, 0x00]);
    assert_eq!(encoded_size(&()), 2);

    let mut reader = bytes;
    decode::<()>(&mut reader).unwrap();
    assert!(reader.is_empty());

    let mut reader = Bytes::from_static(&[0xba, 0x01, 0x00]);
    assert!(matches!(
        decode::<()>(&mut reader),
        Err(EncoderError::ContainerSizeMismatch {
            expected: 0,
            actual: 1
        })
    ));
}

#[test]
fn test_size_matches_written_length() {
    fn check<T: Encoding>(value: &T) {
        let bytes = encode(value).unwrap();
        assert_eq!(bytes.len(), value.size());
    }

    check(&());
    check(&(1u8,));
    check(&(200u8, -3i16, 70000u32, u64::MAX, true));
    check(&(0.5f32, (i64::MIN, (false, ())), [1u16, 300, 70]));
    check(&[[1i8, -100], [127, -128]]);
    check(&(1u8, 2u8, 3u8, 4u8, 5u8, 6u8, 7u8, 8u8, 9u8, 10u8, 11u8, 12u8));
}

#[test]
fn test_encoding_is_deterministic() {
    let value = (42u32, (-7i8, 3.25f64), [9u64, 1 << 40]);
    let first = encode(&value).unwrap();
    let second = encode(&value).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_arity_mismatch_consumes_only_count() {
    let bytes = encode(&(1u8, 2u8, 3u8)).unwrap();
    let mut reader = BufferReader::new(&bytes);
    let mut out = (0u8, 0u8);

    let err = decode_from(&mut out, &mut reader).unwrap_err();
    assert!(matches!(
        err,
        EncoderError::ContainerSizeMismatch {
            expected: 2,
            actual: 3
        }
    ));
    assert_eq!(err.kind(), ErrorKind::Structural);
    // tag and count only
    assert_eq!(reader.position(), 2);
    assert_eq!(out, (0, 0));
}

#[test]
fn test_nested_error_is_not_wrapped() {
    let bytes = encode(&(1u8, (2u8, 3u8, 4u8))).unwrap();
    let mut reader = bytes;
    let err = decode::<(u8, (u8, u8))>(&mut reader).unwrap_err();
    assert!(matches!(
        err,
        EncoderError::ContainerSizeMismatch {
            expected: 2,
            actual: 3
        }
    ));
}

#[test]
fn test_truncated_input_is_rejected() {
    let value = (1u32, 70000u32);
    let bytes = encode(&value).unwrap();
    assert_eq!(&bytes[..], &[0xba, 0x02, 0x01, 0x82, 0x70, 0x11, 0x01, 0x00]);

    for cut in 0..bytes.len() {
        let mut reader = bytes.slice(..cut);
        let err = decode::<(u32, u32)>(&mut reader).unwrap_err();
        assert!(matches!(err, EncoderError::InsufficientData), "cut at {cut}");
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}

#[test]
fn test_wrong_tag_is_rejected() {
    let mut reader = Bytes::from_static(&[0x05]);
    let err = decode::<(u8,)>(&mut reader).unwrap_err();
    assert!(matches!(
        err,
        EncoderError::UnexpectedEncodingByte { actual: 0x05 }
    ));

    assert!(<(u8, u16) as Encoding>::matches(EncodingByte::ARRAY));
    assert!(!<(u8, u16) as Encoding>::matches(EncodingByte::STRUCTURE));
    assert_eq!((1u8,).prefix(), EncodingByte::ARRAY);
}

#[test]
fn test_swapped_elements_fail_on_type() {
    let bytes = encode(&(1u8, 0x1234u16)).unwrap();
    assert_eq!(&bytes[..], &[0xba, 0x02, 0x01, 0x81, 0x34, 0x12]);

    let mut swapped = Bytes::from_static(&[0xba, 0x02, 0x81, 0x34, 0x12, 0x01]);
    let err = decode::<(u8, u16)>(&mut swapped).unwrap_err();
    assert!(matches!(
        err,
        EncoderError::UnexpectedEncodingByte { actual: 0x81 }
    ));
}

#[test]
fn test_swapped_elements_decode_swapped() {
    let bytes = encode(&(1u16, 2u16)).unwrap();
    assert_eq!(&bytes[..], &[0xba, 0x02, 0x01, 0x02]);

    let mut swapped = Bytes::from_static(&[0xba, 0x02, 0x02, 0x01]);
    let decoded: (u16, u16) = decode(&mut swapped).unwrap();
    assert_eq!(decoded, (2, 1));
}

#[test]
fn test_array_matches_homogeneous_tuple() {
    let array = encode(&[7u16, 300, 9]).unwrap();
    let tuple = encode(&(7u16, 300u16, 9u16)).unwrap();
    assert_eq!(array, tuple);

    let mut reader = tuple;
    let decoded: [u16; 3] = decode(&mut reader).unwrap();
    assert_eq!(decoded, [7, 300, 9]);
}

#[test]
fn test_long_array_count() {
    let value = [0u8; 200];
    let bytes = encode(&value).unwrap();
    assert_eq!(&bytes[..3], &[0xba, 0x80, 200]);
    assert_eq!(bytes.len(), 203);

    let mut out = [1u8; 200];
    let mut reader = BufferReader::new(&bytes);
    decode_from(&mut out, &mut reader).unwrap();
    assert_eq!(out, value);
    assert!(reader.is_empty());
}

#[test]
fn test_tuple_of_twelve_round_trip() {
    let value = (
        1u8, -2i8, 300u16, -300i16, 70000u32, -70000i32, 1u64 << 50, i64::MIN, true, 1.5f32,
        -2.25f64, (),
    );
    let mut reader = encode(&value).unwrap();
    let decoded: (u8, i8, u16, i16, u32, i32, u64, i64, bool, f32, f64, ()) =
        decode(&mut reader).unwrap();
    assert_eq!(decoded, value);
}

use cipher::block_padding::Pkcs7;
use cipher::generic_array::GenericArray;
use cipher::{BlockDecrypt, BlockDecryptMut, BlockEncrypt, BlockEncryptMut, KeyInit, KeyIvInit};

use crate::modes::{DesCbcDec, DesCbcEnc, RijndaelCbcDec, RijndaelCbcEnc};
use crate::rijndael::Rijndael;
use crate::{xor, xxtea};

/// The RTON production key: the hex string of an MD5 digest, used as
/// 32 ASCII bytes.
const RIJNDAEL_KEY: &[u8; 32] = b"65bd1b2305f46eb2806b935aab7630bb";

#[test]
fn rijndael_known_block() {
    let cipher = Rijndael::new(GenericArray::from_slice(RIJNDAEL_KEY));

    let mut block = GenericArray::<u8, cipher::consts::U24>::default();
    for (i, b) in block.iter_mut().enumerate() {
        *b = i as u8;
    }

    cipher.encrypt_block(&mut block);

    let expected = hex::decode("43D1885AB2FE0EC5AD48F5FD6D72D852E8FBC649E121CD33").unwrap();
    assert_eq!(block.as_slice(), expected.as_slice());

    cipher.decrypt_block(&mut block);
    for (i, b) in block.iter().enumerate() {
        assert_eq!(*b, i as u8);
    }
}

#[test]
fn rijndael_block_roundtrip() {
    let key = GenericArray::from([0x5Au8; 32]);
    let cipher = Rijndael::new(&key);

    let mut block = GenericArray::from([0u8; 24]);
    block.copy_from_slice(b"twenty-four byte payload");
    let original = block;

    cipher.encrypt_block(&mut block);
    assert_ne!(block, original);

    cipher.decrypt_block(&mut block);
    assert_eq!(block, original);
}

#[test]
fn rijndael_cbc_pkcs7_roundtrip() {
    let iv: [u8; 24] = RIJNDAEL_KEY[4..28].try_into().unwrap();

    for len in [0usize, 1, 23, 24, 25, 100] {
        let data: Vec<u8> = (0..len).map(|i| i as u8).collect();

        let ct = RijndaelCbcEnc::new(RIJNDAEL_KEY.into(), (&iv).into())
            .encrypt_padded_vec_mut::<Pkcs7>(&data);
        assert_eq!(ct.len() % 24, 0);
        assert!(ct.len() > data.len());

        let pt = RijndaelCbcDec::new(RIJNDAEL_KEY.into(), (&iv).into())
            .decrypt_padded_vec_mut::<Pkcs7>(&ct)
            .unwrap();
        assert_eq!(pt, data);
    }
}

#[test]
fn des_cbc_known_vector() {
    // "test" under the TalkWeb key/IV; matches the shipped containers.
    let key = b"TwPay001";
    let iv = [1u8, 2, 3, 4, 5, 6, 7, 8];

    let ct = DesCbcEnc::new(key.into(), (&iv).into()).encrypt_padded_vec_mut::<Pkcs7>(b"test");
    assert_eq!(ct, hex::decode("0696AEBEFA2EF820").unwrap());

    let pt = DesCbcDec::new(key.into(), (&iv).into())
        .decrypt_padded_vec_mut::<Pkcs7>(&ct)
        .unwrap();
    assert_eq!(pt, b"test");
}

#[test]
fn des_cbc_rejects_garbage_padding() {
    let key = b"TwPay001";
    let iv = [1u8, 2, 3, 4, 5, 6, 7, 8];

    // Random-looking block is overwhelmingly unlikely to unpad cleanly,
    // and this particular one does not.
    let bogus = hex::decode("0696AEBEFA2EF821").unwrap();
    let result = DesCbcDec::new(key.into(), (&iv).into()).decrypt_padded_vec_mut::<Pkcs7>(&bogus);
    assert!(result.is_err());
}

#[test]
fn xxtea_known_vector() {
    let key = b"7ec34b808tk94hf1";

    let ct = xxtea::encrypt_data(b"abc", key);
    assert_eq!(ct, hex::decode("0A4CCDBFF14E23BC").unwrap());

    assert_eq!(xxtea::decrypt_data(&ct, key).unwrap(), b"abc");
}

#[test]
fn xxtea_roundtrip_various_lengths() {
    let key = b"0123456789abcdef";

    for len in [1usize, 3, 4, 5, 8, 13, 64, 1000] {
        let data: Vec<u8> = (0..len).map(|i| (i * 7) as u8).collect();
        let ct = xxtea::encrypt_data(&data, key);

        // words(ceil(len / 4)) + trailing length word
        assert_eq!(ct.len(), 4 * (len.div_ceil(4) + 1));
        assert_eq!(xxtea::decrypt_data(&ct, key).unwrap(), data);
    }
}

#[test]
fn xxtea_empty_passthrough() {
    let key = b"0123456789abcdef";
    assert!(xxtea::encrypt_data(b"", key).is_empty());
    assert!(xxtea::decrypt_data(b"", key).unwrap().is_empty());
}

#[test]
fn xxtea_rejects_malformed_ciphertext() {
    let key = b"0123456789abcdef";

    assert!(matches!(
        xxtea::decrypt_data(&[0u8; 7], key),
        Err(xxtea::XxteaError::UnalignedCiphertext(7))
    ));
    assert!(matches!(
        xxtea::decrypt_data(&[0u8; 4], key),
        Err(xxtea::XxteaError::TruncatedCiphertext(4))
    ));

    // Wrong-key decrypt of a valid buffer almost surely corrupts the
    // embedded length word.
    let ct = xxtea::encrypt_data(&[0x55u8; 40], key);
    let wrong = b"fedcba9876543210";
    assert!(matches!(
        xxtea::decrypt_data(&ct, wrong),
        Err(xxtea::XxteaError::CorruptLength { .. })
    ));
}

#[test]
fn xor_keystream_is_self_inverse() {
    let key = b"AS23DSREPLKL335KO4439032N8345NF";
    let original: Vec<u8> = (0..256u32).map(|i| i as u8).collect();

    let mut data = original.clone();
    xor::apply_keystream(&mut data, key);
    assert_ne!(data, original);

    xor::apply_keystream(&mut data, key);
    assert_eq!(data, original);
}

#[test]
fn xor_keystream_repeats_key() {
    let key = [0xFFu8, 0x00];
    let mut data = vec![0u8; 6];
    xor::apply_keystream(&mut data, &key);
    assert_eq!(data, [0xFF, 0x00, 0xFF, 0x00, 0xFF, 0x00]);
}

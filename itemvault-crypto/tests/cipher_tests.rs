use itemvault_crypto::{BlockCipher, CryptoError, HEADER_SIZE, SALT_SIZE, TAG_SIZE};

fn test_cipher() -> BlockCipher {
    BlockCipher::new("aes-256-gcm", b"correct horse battery staple".to_vec())
}

#[test]
fn encrypt_decrypt_roundtrip() {
    let cipher = test_cipher();
    let plaintext = b"Hello, World!";
    let sealed = cipher.encrypt(plaintext).unwrap();
    let opened = cipher.decrypt(&sealed).unwrap();
    assert_eq!(opened, plaintext);
}

#[test]
fn encrypt_decrypt_empty() {
    let cipher = test_cipher();
    let sealed = cipher.encrypt(b"").unwrap();
    assert_eq!(sealed.len(), HEADER_SIZE + TAG_SIZE);
    let opened = cipher.decrypt(&sealed).unwrap();
    assert_eq!(opened, b"");
}

#[test]
fn encrypt_decrypt_large_data() {
    let cipher = test_cipher();
    let plaintext: Vec<u8> = (0..10000).map(|i| (i % 256) as u8).collect();
    let sealed = cipher.encrypt(&plaintext).unwrap();
    let opened = cipher.decrypt(&sealed).unwrap();
    assert_eq!(opened, plaintext);
}

#[test]
fn output_layout_is_exact() {
    let cipher = test_cipher();
    let plaintext = b"layout";
    let sealed = cipher.encrypt(plaintext).unwrap();
    // [16-byte salt][12-byte iv][ciphertext || 16-byte tag]
    assert_eq!(sealed.len(), SALT_SIZE + 12 + plaintext.len() + TAG_SIZE);
}

#[test]
fn wrong_secret_fails_with_integrity() {
    let a = BlockCipher::new("aes-256-gcm", b"secret-a".to_vec());
    let b = BlockCipher::new("aes-256-gcm", b"secret-b".to_vec());
    let sealed = a.encrypt(b"Secret").unwrap();
    match b.decrypt(&sealed) {
        Err(CryptoError::Integrity) => {}
        other => panic!("expected Integrity, got {other:?}"),
    }
}

#[test]
fn tampered_ciphertext_fails_with_integrity() {
    let cipher = test_cipher();
    let mut sealed = cipher.encrypt(b"Secret").unwrap();
    let last = sealed.len() - 1;
    sealed[last] ^= 0xFF;
    match cipher.decrypt(&sealed) {
        Err(CryptoError::Integrity) => {}
        other => panic!("expected Integrity, got {other:?}"),
    }
}

#[test]
fn truncated_input_is_malformed_not_integrity() {
    let cipher = test_cipher();
    // Shorter than salt + iv + tag: structurally invalid.
    match cipher.decrypt(&[0u8; 10]) {
        Err(CryptoError::Malformed { len, min }) => {
            assert_eq!(len, 10);
            assert_eq!(min, HEADER_SIZE + TAG_SIZE);
        }
        other => panic!("expected Malformed, got {other:?}"),
    }
}

#[test]
fn same_plaintext_produces_different_ciphertext() {
    let cipher = test_cipher();
    let s1 = cipher.encrypt(b"Same").unwrap();
    let s2 = cipher.encrypt(b"Same").unwrap();
    assert_ne!(s1, s2);
}

#[test]
fn decrypt_honors_offset() {
    let cipher = test_cipher();
    let sealed = cipher.encrypt(b"offset me").unwrap();

    let mut framed = vec![0xAA; 7];
    framed.extend_from_slice(&sealed);

    let opened = cipher.decrypt_with(&framed, 7, |size| vec![0u8; size]).unwrap();
    assert_eq!(opened, b"offset me");
}

#[test]
fn encrypt_into_presized_buffer() {
    let cipher = test_cipher();
    let plaintext = b"zero copy";
    let total = HEADER_SIZE + plaintext.len() + TAG_SIZE;

    // Place the ciphertext inside a larger stream buffer.
    let mut stream = vec![0u8; 4 + total];
    let (_, tail) = stream.split_at_mut(4);
    cipher
        .encrypt_with(plaintext, move |size| {
            assert_eq!(size, total);
            tail
        })
        .unwrap();

    let opened = cipher.decrypt_with(&stream, 4, |size| vec![0u8; size]).unwrap();
    assert_eq!(opened, plaintext);
}

#[test]
fn undersized_allocation_is_rejected() {
    let cipher = test_cipher();
    let mut small = [0u8; 4];
    let small_ref = &mut small[..];
    match cipher.encrypt_with(b"too big", move |_| small_ref) {
        Err(CryptoError::BufferTooSmall { needed, got }) => {
            assert!(needed > got);
        }
        other => panic!("expected BufferTooSmall, got {other:?}"),
    }
}

#[test]
fn cipher_id_is_deterministic() {
    let a = BlockCipher::new("aes-256-gcm", b"secret".to_vec());
    let b = BlockCipher::new("aes-256-gcm", b"secret".to_vec());
    assert_eq!(a.id(), b.id());
}

#[test]
fn cipher_id_distinguishes_secret_and_name() {
    let base = BlockCipher::new("aes-256-gcm", b"secret".to_vec());
    let other_secret = BlockCipher::new("aes-256-gcm", b"different".to_vec());
    let other_name = BlockCipher::new("aes-128-gcm", b"secret".to_vec());
    assert_ne!(base.id(), other_secret.id());
    assert_ne!(base.id(), other_name.id());
}

#[test]
fn debug_redacts_secret() {
    let cipher = test_cipher();
    let printed = format!("{cipher:?}");
    assert!(printed.contains("REDACTED"));
    assert!(!printed.contains("correct horse"));
}

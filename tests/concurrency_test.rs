use std::thread;

use tagwire::{decode, encode, Encoding};

type Sample = (u32, (i16, [u8; 3]), f64, bool);

fn sample(seed: u32) -> Sample {
    (seed * 1000, (-(seed as i16), [seed as u8, 200, 7]), seed as f64 / 4.0, seed % 2 == 0)
}

#[test]
fn test_codecs_run_concurrently() {
    let expected: Vec<_> = (0..8).map(|seed| encode(&sample(seed)).unwrap()).collect();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8u32)
            .map(|seed| {
                scope.spawn(move || {
                    let value = sample(seed);
                    let mut runs = Vec::new();
                    for _ in 0..100 {
                        let bytes = encode(&value).unwrap();
                        assert_eq!(bytes.len(), value.size());
                        let mut reader = bytes.clone();
                        let decoded: Sample = decode(&mut reader).unwrap();
                        assert_eq!(decoded, value);
                        runs.push(bytes);
                    }
                    runs
                })
            })
            .collect();

        for (seed, handle) in handles.into_iter().enumerate() {
            let runs = handle.join().unwrap();
            assert!(runs.iter().all(|bytes| *bytes == expected[seed]));
        }
    });
}

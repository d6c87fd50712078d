#![cfg(feature = "rayon")]

use fpmatch::{identify, identify_par, FpMatchError, EMBEDDING_LEN};
use rand::Rng;

fn make_database(size: usize, len: usize) -> Vec<Vec<f32>> {
    let mut rng = rand::rng();
    (0..size)
        .map(|_| (0..len).map(|_| rng.random::<f32>() * 2.0 - 1.0).collect())
        .collect()
}

#[test]
fn parallel_identification_matches_sequential() {
    let database = make_database(128, EMBEDDING_LEN);
    let query = database[17].clone();

    let seq = identify(&query, &database).unwrap();
    let par = identify_par(&query, &database).unwrap();

    assert_eq!(seq.len(), par.len());
    for (i, (s, p)) in seq.iter().zip(par.iter()).enumerate() {
        assert_eq!(s, p, "score mismatch at index {i}");
    }
}

#[test]
fn parallel_identification_validates_lengths_up_front() {
    let mut database = make_database(8, EMBEDDING_LEN);
    database[5] = vec![0.0; EMBEDDING_LEN - 1];
    let query = database[0].clone();

    assert_eq!(
        identify_par(&query, &database).err().unwrap(),
        FpMatchError::LengthMismatch {
            expected: EMBEDDING_LEN,
            got: EMBEDDING_LEN - 1,
        },
    );
}

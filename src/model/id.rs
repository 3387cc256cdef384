use chrono::Utc;
use rand::Rng;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_LEN: usize = 9;

/// Fresh record id: `<unix millis>_<9 random base36 chars>`.
///
/// `taken` reports ids already present in the target collection; a clash
/// re-rolls the random part.
pub(crate) fn generate_id(taken: impl Fn(&str) -> bool) -> String {
    let mut rng = rand::thread_rng();
    loop {
        let suffix: String = (0..RANDOM_LEN)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect();
        let id = format!("{}_{}", Utc::now().timestamp_millis(), suffix);
        if !taken(&id) {
            return id;
        }
    }
}

use rand::Rng;
use rand::seq::SliceRandom;
use secrecy::Secret;

const LOWERCASE: &[u8] = b"abcdefghijkmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
const DIGITS: &[u8] = b"23456789";
const SYMBOLS: &[u8] = b"!#$%&*+-=?@^_";

/// Generate a temporary password of `length` characters containing at least
/// one character from each class. `length` below 4 is raised to 4.
pub fn generate_temporary_password(length: usize) -> Secret<String> {
    let classes = [LOWERCASE, UPPERCASE, DIGITS, SYMBOLS];
    let length = length.max(classes.len());
    let mut rng = rand::rng();

    let mut chars: Vec<u8> = classes
        .iter()
        .map(|class| class[rng.random_range(0..class.len())])
        .collect();

    while chars.len() < length {
        let class = classes[rng.random_range(0..classes.len())];
        chars.push(class[rng.random_range(0..class.len())]);
    }
    chars.shuffle(&mut rng);

    Secret::from(chars.into_iter().map(char::from).collect::<String>())
}

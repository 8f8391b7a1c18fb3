//! 닉네임 자동 생성
//!
//! `형용사_동물_숫자` 형태(예: `clever_fox_042`)의 닉네임을 생성합니다.
//! 닉네임 검증 규칙(3-50자, 영문/숫자/언더스코어)을 항상 만족합니다.

use rand::Rng;
use rand::seq::SliceRandom;

const ADJECTIVES: &[&str] = &[
    "clever", "jolly", "brave", "sly", "gentle", "swift", "quiet", "bold", "happy", "lucky",
    "mighty", "calm", "eager", "fuzzy", "witty",
];

const ANIMALS: &[&str] = &[
    "panda", "fox", "raccoon", "koala", "lion", "otter", "falcon", "badger", "heron", "lynx",
    "marmot", "wombat", "owl", "tiger", "whale",
];

pub fn generate_nickname() -> String {
    let mut rng = rand::thread_rng();
    let adjective = ADJECTIVES.choose(&mut rng).copied().unwrap_or("happy");
    let animal = ANIMALS.choose(&mut rng).copied().unwrap_or("panda");
    let number: u16 = rng.gen_range(0..1000);

    format!("{}_{}_{:03}", adjective, animal, number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dto::users::request::validators::validate_nickname;

    #[test]
    fn test_generated_nickname_shape() {
        for _ in 0..50 {
            let nickname = generate_nickname();
            let parts: Vec<&str> = nickname.split('_').collect();

            assert_eq!(parts.len(), 3, "unexpected nickname: {}", nickname);
            assert!(ADJECTIVES.contains(&parts[0]));
            assert!(ANIMALS.contains(&parts[1]));
            assert_eq!(parts[2].len(), 3);
        }
    }

    #[test]
    fn test_generated_nickname_passes_validation() {
        for _ in 0..50 {
            let nickname = generate_nickname();
            assert!(validate_nickname(&nickname).is_ok());
            assert!((3..=50).contains(&nickname.len()));
        }
    }
}

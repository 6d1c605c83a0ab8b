/// RGB colors for the painted field.

use rand::Rng;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
    pub const SNAKE: Rgb = Rgb::new(0x28, 0xa7, 0x45);
    pub const FOOD: Rgb = Rgb::new(0xdc, 0x35, 0x45);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Uniformly random color (each hex digit independent).
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Rgb::new(rng.random(), rng.random(), rng.random())
    }

    /// `#RRGGBB`
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    #[test]
    fn hex_formatting() {
        assert_eq!(Rgb::SNAKE.hex(), "#28A745");
        assert_eq!(Rgb::FOOD.hex(), "#DC3545");
        assert_eq!(Rgb::new(0, 1, 255).hex(), "#0001FF");
    }

    #[test]
    fn random_is_seed_stable() {
        let a = Rgb::random(&mut ChaCha12Rng::seed_from_u64(7));
        let b = Rgb::random(&mut ChaCha12Rng::seed_from_u64(7));
        assert_eq!(a, b);
    }
}

use serde::{Deserialize, Serialize};

/// Map coordinates as reported by the game API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        distance(self, other)
    }
}

pub fn distance(a: &Position, b: &Position) -> f64 {
    let dx = f64::from(b.x) - f64::from(a.x);
    let dy = f64::from(b.y) - f64::from(a.y);
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Position::new(0, 0);
        let b = Position::new(3000, 4000);
        assert_eq!(distance(&a, &b), 5000.0);
        assert_eq!(b.distance_to(&a), 5000.0);
    }

    #[test]
    fn distance_to_self_is_zero() {
        let p = Position::new(10565, 1045);
        assert_eq!(p.distance_to(&p), 0.0);
    }
}

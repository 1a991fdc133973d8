// src/math/types/int_point.rs

/// Punkt auf dem Festkomma-Gitter, auf dem die Boolean-Operationen laufen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntPoint {
    pub x: i64,
    pub y: i64,
}

impl IntPoint {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl From<(i64, i64)> for IntPoint {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

/// Geschlossener Ring auf dem Gitter; der erste Punkt wird nicht wiederholt.
pub type IntPath = Vec<IntPoint>;

/// Doppelte Fläche eines Gitter-Rings (positiv bei Gegen-Uhrzeigersinn).
pub fn int_path_double_area(path: &[IntPoint]) -> i128 {
    if path.len() < 3 {
        return 0;
    }
    let mut sum: i128 = 0;
    for i in 0..path.len() {
        let a = path[i];
        let b = path[(i + 1) % path.len()];
        sum += i128::from(a.x) * i128::from(b.y) - i128::from(b.x) * i128::from(a.y);
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_area_sign_follows_winding() {
        let ccw: IntPath = vec![
            IntPoint::new(0, 0),
            IntPoint::new(10, 0),
            IntPoint::new(10, 10),
            IntPoint::new(0, 10),
        ];
        let cw: IntPath = ccw.iter().rev().copied().collect();

        assert_eq!(int_path_double_area(&ccw), 200);
        assert_eq!(int_path_double_area(&cw), -200);
        assert_eq!(int_path_double_area(&ccw[..2]), 0);
    }
}

/// 2D coordinate represented with ordinary floating-point inputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Coord {
    fn from(value: (f64, f64)) -> Self {
        Coord::new(value.0, value.1)
    }
}

impl From<[f64; 2]> for Coord {
    fn from(value: [f64; 2]) -> Self {
        Coord::new(value[0], value[1])
    }
}

/// 3D coordinate represented with ordinary floating-point inputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coord3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Coord3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<(f64, f64, f64)> for Coord3 {
    fn from(value: (f64, f64, f64)) -> Self {
        Coord3::new(value.0, value.1, value.2)
    }
}

impl From<[f64; 3]> for Coord3 {
    fn from(value: [f64; 3]) -> Self {
        Coord3::new(value[0], value[1], value[2])
    }
}

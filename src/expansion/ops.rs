use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use super::Expansion;

impl<'b> Add<&'b Expansion> for &Expansion {
    type Output = Expansion;

    fn add(self, rhs: &'b Expansion) -> Expansion {
        self.add_expansion(rhs)
    }
}

impl Add for Expansion {
    type Output = Expansion;

    fn add(self, rhs: Expansion) -> Expansion {
        (&self).add(&rhs)
    }
}

impl Add<&Expansion> for Expansion {
    type Output = Expansion;

    fn add(self, rhs: &Expansion) -> Expansion {
        (&self).add(rhs)
    }
}

impl AddAssign for Expansion {
    fn add_assign(&mut self, rhs: Self) {
        *self = (&*self).add(&rhs);
    }
}

impl AddAssign<&Expansion> for Expansion {
    fn add_assign(&mut self, rhs: &Expansion) {
        *self = (&*self).add(rhs);
    }
}

impl<'b> Sub<&'b Expansion> for &Expansion {
    type Output = Expansion;

    fn sub(self, rhs: &'b Expansion) -> Expansion {
        self.add_expansion(&rhs.negate())
    }
}

impl Sub for Expansion {
    type Output = Expansion;

    fn sub(self, rhs: Expansion) -> Expansion {
        (&self).sub(&rhs)
    }
}

impl Sub<&Expansion> for Expansion {
    type Output = Expansion;

    fn sub(self, rhs: &Expansion) -> Expansion {
        (&self).sub(rhs)
    }
}

impl SubAssign for Expansion {
    fn sub_assign(&mut self, rhs: Self) {
        *self = (&*self).sub(&rhs);
    }
}

impl SubAssign<&Expansion> for Expansion {
    fn sub_assign(&mut self, rhs: &Expansion) {
        *self = (&*self).sub(rhs);
    }
}

impl<'b> Mul<&'b Expansion> for &Expansion {
    type Output = Expansion;

    fn mul(self, rhs: &'b Expansion) -> Expansion {
        self.mul_expansion(rhs)
    }
}

impl Mul for Expansion {
    type Output = Expansion;

    fn mul(self, rhs: Expansion) -> Expansion {
        (&self).mul(&rhs)
    }
}

impl Mul<&Expansion> for Expansion {
    type Output = Expansion;

    fn mul(self, rhs: &Expansion) -> Expansion {
        (&self).mul(rhs)
    }
}

impl Mul<f64> for &Expansion {
    type Output = Expansion;

    fn mul(self, rhs: f64) -> Expansion {
        self.scale(rhs)
    }
}

impl Neg for Expansion {
    type Output = Expansion;

    fn neg(self) -> Expansion {
        self.negate()
    }
}

impl Neg for &Expansion {
    type Output = Expansion;

    fn neg(self) -> Expansion {
        self.negate()
    }
}

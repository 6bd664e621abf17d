//! Middle of three values

/// Median of `x`, `y` and `z`
pub fn middle(x: i32, y: i32, z: i32) -> i32 {
    if y < z {
        if x < y {
            y
        } else if x < z {
            x
        } else {
            z
        }
    } else if x > y {
        y
    } else if x > z {
        x
    } else {
        z
    }
}

/// The boundary-condition bug: when `y <= x < z` this returns `y`
#[allow(clippy::if_same_then_else)]
pub fn middle_faulty(x: i32, y: i32, z: i32) -> i32 {
    let mut m = z;
    if y < z {
        if x < y {
            m = y;
        } else if x < z {
            m = y;
        }
    } else if x > y {
        m = y;
    } else if x > z {
        m = x;
    }
    m
}

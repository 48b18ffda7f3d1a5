use std::fmt;

/// Modulus CPython uses to reduce integer hashes on 64-bit builds.
const HASH_MODULUS: u64 = (1 << 61) - 1;

const NONE_HASH: i64 = 0x10_2d6a_1e40;

/// A hashable object usable as both key and value.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Obj {
    None,
    Int(i64),
    Str(String),
}

impl Obj {
    /// Hash the way the tables store it. `-1` is never produced.
    pub fn py_hash(&self) -> i64 {
        let h = match self {
            Obj::None => NONE_HASH,
            Obj::Int(n) => {
                let h = (n.unsigned_abs() % HASH_MODULUS) as i64;
                if *n < 0 {
                    -h
                } else {
                    h
                }
            }
            Obj::Str(s) if s.is_empty() => 0,
            Obj::Str(s) => xxhash_rust::xxh3::xxh3_64(s.as_bytes()) as i64,
        };
        if h == -1 {
            -2
        } else {
            h
        }
    }
}

impl fmt::Debug for Obj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Obj::None => write!(f, "None"),
            Obj::Int(n) => write!(f, "{n}"),
            Obj::Str(s) => write!(f, "'{s}'"),
        }
    }
}

impl fmt::Display for Obj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl From<i64> for Obj {
    fn from(n: i64) -> Self {
        Obj::Int(n)
    }
}

impl From<&str> for Obj {
    fn from(s: &str) -> Self {
        Obj::Str(s.to_owned())
    }
}

impl From<String> for Obj {
    fn from(s: String) -> Self {
        Obj::Str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_hash() {
        assert_eq!(Obj::Int(0).py_hash(), 0);
        assert_eq!(Obj::Int(1).py_hash(), 1);
        assert_eq!(Obj::Int(-5).py_hash(), -5);
        assert_eq!(Obj::Int(-1).py_hash(), -2);
        assert_eq!(Obj::Int(-2).py_hash(), -2);
        assert_eq!(Obj::Int(1 << 61).py_hash(), 1);
        assert_eq!(Obj::Int(i64::MIN).py_hash(), -4);
    }

    #[test]
    fn test_str_hash() {
        assert_eq!(Obj::from("").py_hash(), 0);
        assert_eq!(Obj::from("abc").py_hash(), Obj::from("abc").py_hash());
        assert_ne!(Obj::from("abc").py_hash(), Obj::from("abd").py_hash());
        assert_ne!(Obj::from("abc").py_hash(), -1);
    }

    #[test]
    fn test_repr() {
        assert_eq!(format!("{:?}", Obj::None), "None");
        assert_eq!(format!("{:?}", Obj::Int(-3)), "-3");
        assert_eq!(format!("{}", Obj::from("a")), "'a'");
    }
}

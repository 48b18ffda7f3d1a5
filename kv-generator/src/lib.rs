use dictstress::KeyValueFactory;
use pydict::Obj;
use rand::Rng;

fn pool_bound(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Numeric keys from `[-n, n]` and numeric values. The range includes
/// `-1` and `-2`, which share a hash.
pub struct IntKeyValueFactory {
    n: i64,
}

impl IntKeyValueFactory {
    pub fn new(n: usize) -> Self {
        Self { n: pool_bound(n) }
    }
}

impl KeyValueFactory<Obj, Obj> for IntKeyValueFactory {
    fn generate_key<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Obj {
        Obj::Int(rng.random_range(-self.n..=self.n))
    }

    fn generate_value<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Obj {
        Obj::Int(rng.random::<i32>() as i64)
    }
}

enum KindChoice {
    Int,
    Str,
    None,
}

pub struct KindRatio {
    pub int: u32,
    pub str: u32,
    pub none: u32,
}

struct KindChoiceGenerator {
    total: u32,
    top_int: u32,
    top_str: u32,
}

impl KindChoiceGenerator {
    fn new(ratio: KindRatio) -> Self {
        let total = ratio.int + ratio.str + ratio.none;

        let top_int = ratio.int;
        let top_str = top_int + ratio.str;

        Self {
            total,
            top_int,
            top_str,
        }
    }

    fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> KindChoice {
        let r = rng.random_range(0..self.total);

        if r < self.top_int {
            return KindChoice::Int;
        }

        if r < self.top_str {
            return KindChoice::Str;
        }

        KindChoice::None
    }
}

/// Mixed keys and values: integers, short strings and `None`, drawn from
/// pools sized by `n` so that repeated keys and collisions happen.
pub struct AllKeyValueFactory {
    n: i64,
    key_kinds: KindChoiceGenerator,
    value_kinds: KindChoiceGenerator,
}

impl AllKeyValueFactory {
    pub fn new(n: usize) -> Self {
        Self::with_ratios(
            n,
            KindRatio {
                int: 45,
                str: 50,
                none: 5,
            },
            KindRatio {
                int: 40,
                str: 40,
                none: 20,
            },
        )
    }

    /// Both ratios must not sum to zero.
    pub fn with_ratios(n: usize, key_ratio: KindRatio, value_ratio: KindRatio) -> Self {
        Self {
            n: pool_bound(n),
            key_kinds: KindChoiceGenerator::new(key_ratio),
            value_kinds: KindChoiceGenerator::new(value_ratio),
        }
    }

    fn make<R: Rng + ?Sized>(&self, kind: KindChoice, prefix: &str, rng: &mut R) -> Obj {
        match kind {
            KindChoice::Int => Obj::Int(rng.random_range(-self.n..=self.n)),
            KindChoice::Str => Obj::Str(format!("{prefix}{}", rng.random_range(0..=self.n))),
            KindChoice::None => Obj::None,
        }
    }
}

impl KeyValueFactory<Obj, Obj> for AllKeyValueFactory {
    fn generate_key<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Obj {
        let kind = self.key_kinds.choose(rng);
        self.make(kind, "k", rng)
    }

    fn generate_value<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Obj {
        let kind = self.value_kinds.choose(rng);
        self.make(kind, "value_", rng)
    }
}

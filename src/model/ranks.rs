use lazy_static::lazy_static;

/// Minimum rating required for a rank label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankThreshold {
    pub min_rating: i32,
    pub label: &'static str
}

/// Threshold table in definition order.
///
/// Lookups scan the table front to back and stop at the first threshold above the
/// rating, so the order of entries matters. The default table is not strictly
/// increasing (`Герой 2` at 2464 is followed by `Герой 3` at 2218 and `Легенда 1`
/// at 2400); the scan is kept as-is so existing players keep the ranks they were
/// shown. Use [`RankTable::sorted`] for a table ordered by threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankTable {
    entries: Vec<RankThreshold>
}

const RANKS: [(i32, &str); 22] = [
    (0, "Рекрут 1"),
    (154, "Рекрут 2"),
    (308, "Рекрут 3"),
    (770, "Страж 1"),
    (924, "Страж 2"),
    (1078, "Страж 3"),
    (1540, "Рыцарь 1"),
    (1694, "Рыцарь 2"),
    (1848, "Рыцарь 3"),
    (2310, "Герой 1"),
    (2464, "Герой 2"),
    (2218, "Герой 3"),
    (2400, "Легенда 1"),
    (2600, "Легенда 2"),
    (2800, "Легенда 3"),
    (3000, "Властелин 1"),
    (3200, "Властелин 2"),
    (3400, "Властелин 3"),
    (3600, "Божество 1"),
    (3800, "Божество 2"),
    (4000, "Божество 3"),
    (4200, "Титан 1")
];

lazy_static! {
    pub static ref DEFAULT_RANKS: RankTable = RankTable {
        entries: RANKS
            .iter()
            .map(|&(min_rating, label)| RankThreshold { min_rating, label })
            .collect()
    };
}

impl RankTable {
    /// Returns `None` for an empty table, which has no label to fall back on.
    pub fn new(entries: Vec<RankThreshold>) -> Option<RankTable> {
        if entries.is_empty() {
            return None;
        }

        Some(RankTable { entries })
    }

    pub fn entries(&self) -> &[RankThreshold] {
        &self.entries
    }

    /// Label of the last threshold at or below `rating`, scanning in definition order
    /// and stopping at the first threshold above it. Ratings below the first threshold
    /// get the first label.
    pub fn rank_for(&self, rating: i32) -> &'static str {
        let mut current = self.entries[0].label;

        for entry in &self.entries {
            if rating >= entry.min_rating {
                current = entry.label;
            } else {
                break;
            }
        }

        current
    }

    /// True if every threshold is strictly greater than the one before it.
    pub fn is_monotonic(&self) -> bool {
        self.entries.windows(2).all(|w| w[0].min_rating < w[1].min_rating)
    }

    pub fn sorted(&self) -> RankTable {
        let mut entries = self.entries.clone();
        entries.sort_by_key(|e| e.min_rating);

        RankTable { entries }
    }
}

/// Rank label for `rating` using the default table.
pub fn rank_for(rating: i32) -> &'static str {
    DEFAULT_RANKS.rank_for(rating)
}

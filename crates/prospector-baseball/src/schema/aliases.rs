// Column alias table: canonical metric key -> accepted raw headers.
//
// Aliases are listed in priority order; the first one present in a dataset
// wins. Each list starts with the canonical key itself so already-canonical
// headers resolve to themselves.

/// Canonical keys used throughout the resolver and the pipeline.
pub mod keys {
    pub const FIRST_NAME: &str = "first_name";
    pub const LAST_NAME: &str = "last_name";
    pub const BIRTH_DATE: &str = "birth_date";
    pub const WEIGHT: &str = "weight";
    pub const HEIGHT: &str = "height";

    pub const G: &str = "G";
    pub const AB: &str = "AB";
    pub const H: &str = "H";
    pub const DOUBLES: &str = "2B";
    pub const TRIPLES: &str = "3B";
    pub const HR: &str = "HR";
    pub const BB: &str = "BB";
    pub const SO: &str = "SO";
    pub const HBP: &str = "HBP";
    pub const SF: &str = "SF";
    pub const ER: &str = "ER";
    pub const IP: &str = "IP";
    pub const PO: &str = "PO";
    pub const A: &str = "A";
    pub const E: &str = "E";

    pub const AVG: &str = "AVG";
    pub const OBP: &str = "OBP";
    pub const SLG: &str = "SLG";
    pub const OPS: &str = "OPS";
    pub const K_PCT: &str = "K%";
    pub const BB_PER_K: &str = "BB/K";
    pub const FPCT: &str = "FPCT";
    pub const RF: &str = "RF";
    pub const ERA: &str = "ERA";
    pub const WHIP: &str = "WHIP";
    pub const K_PER_9: &str = "K/9";
    pub const BB_PER_9: &str = "BB/9";
    pub const K_PER_BB: &str = "K/BB";
}

/// One canonical key and its ordered aliases.
#[derive(Debug, Clone, Copy)]
pub struct AliasEntry {
    pub key: &'static str,
    pub aliases: &'static [&'static str],
}

/// Immutable, process-wide alias table.
#[derive(Debug, Clone, Copy)]
pub struct ColumnAliasTable {
    entries: &'static [AliasEntry],
}

impl ColumnAliasTable {
    pub const fn new(entries: &'static [AliasEntry]) -> Self {
        ColumnAliasTable { entries }
    }

    pub fn entries(&self) -> &'static [AliasEntry] {
        self.entries
    }

    pub fn aliases(&self, key: &str) -> Option<&'static [&'static str]> {
        self.entries.iter().find(|e| e.key == key).map(|e| e.aliases)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub static COLUMN_ALIASES: ColumnAliasTable = ColumnAliasTable::new(ALIAS_ENTRIES);

const ALIAS_ENTRIES: &[AliasEntry] = &[
    // Identity
    AliasEntry {
        key: keys::FIRST_NAME,
        aliases: &["first_name", "nombre", "name", "player name", "player", "jugador", "first name"],
    },
    AliasEntry {
        key: keys::LAST_NAME,
        aliases: &["last_name", "apellido", "last name", "lastname"],
    },
    AliasEntry {
        key: keys::BIRTH_DATE,
        aliases: &[
            "birth_date",
            "birth date",
            "fecha de nacimiento",
            "fecha nacimiento",
            "fecha nac",
            "nacimiento",
            "dob",
        ],
    },
    AliasEntry {
        key: keys::WEIGHT,
        aliases: &["weight", "peso", "kg"],
    },
    AliasEntry {
        key: keys::HEIGHT,
        aliases: &["height", "estatura", "cm"],
    },
    // Counting stats
    AliasEntry {
        key: keys::G,
        aliases: &["g", "jj", "j", "games", "juegos", "juegos jugados"],
    },
    AliasEntry {
        key: keys::AB,
        aliases: &["ab", "vb", "at bats", "turnos al bate"],
    },
    AliasEntry {
        key: keys::H,
        aliases: &["h", "hp", "hits", "hits totales"],
    },
    AliasEntry {
        key: keys::DOUBLES,
        aliases: &["2b", "h2", "doubles", "dobles"],
    },
    AliasEntry {
        key: keys::TRIPLES,
        aliases: &["3b", "h3", "triples"],
    },
    AliasEntry {
        key: keys::HR,
        aliases: &["hr", "home runs", "jonrones"],
    },
    AliasEntry {
        key: keys::BB,
        aliases: &["bb", "walks", "bases por bolas"],
    },
    AliasEntry {
        key: keys::SO,
        aliases: &["so", "k", "strikeouts", "ponches"],
    },
    AliasEntry {
        key: keys::HBP,
        aliases: &["hbp", "gp", "hit by pitch", "golpeado"],
    },
    AliasEntry {
        key: keys::SF,
        aliases: &["sf", "sacrifice flies", "fly de sacrificio"],
    },
    AliasEntry {
        key: keys::ER,
        aliases: &["er", "cl", "earned runs", "carreras limpias"],
    },
    AliasEntry {
        key: keys::IP,
        aliases: &["ip", "il", "innings pitched", "entradas lanzadas"],
    },
    AliasEntry {
        key: keys::PO,
        aliases: &["po", "putouts"],
    },
    AliasEntry {
        key: keys::A,
        aliases: &["a", "as", "assists", "asistencias"],
    },
    AliasEntry {
        key: keys::E,
        aliases: &["e", "err", "errors", "errores"],
    },
    // Rate stats, looked up so sourced values can be passed through
    AliasEntry {
        key: keys::AVG,
        aliases: &["avg", "ba", "pdb", "average", "promedio", "promedio de bateo"],
    },
    AliasEntry {
        key: keys::OBP,
        aliases: &["obp", "pde", "on-base percentage"],
    },
    AliasEntry {
        key: keys::SLG,
        aliases: &["slg", "slugging"],
    },
    AliasEntry {
        key: keys::OPS,
        aliases: &["ops"],
    },
    AliasEntry {
        key: keys::K_PCT,
        aliases: &["k%", "k_percentage", "so%", "k_%"],
    },
    AliasEntry {
        key: keys::BB_PER_K,
        aliases: &["bb/k", "bb_k", "bb/so", "bb_so"],
    },
    AliasEntry {
        key: keys::FPCT,
        aliases: &["fpct", "pdf", "fielding_percentage", "porcentaje de fildeo", "% de fildeo"],
    },
    AliasEntry {
        key: keys::RF,
        aliases: &["rf", "range_factor"],
    },
    AliasEntry {
        key: keys::ERA,
        aliases: &["era", "efec", "efect", "efectividad"],
    },
    AliasEntry {
        key: keys::WHIP,
        aliases: &["whip"],
    },
    AliasEntry {
        key: keys::K_PER_9,
        aliases: &["k/9", "k_9", "so/9", "so_9"],
    },
    AliasEntry {
        key: keys::BB_PER_9,
        aliases: &["bb/9", "bb_9"],
    },
    AliasEntry {
        key: keys::K_PER_BB,
        aliases: &["k/bb", "k_bb", "so/bb", "so_bb"],
    },
];

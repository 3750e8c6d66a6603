use std::fmt;
use std::str::FromStr;

/// Marketplace servers and the `sid` cookie value each one uses.
const SERVERS: &[(&str, &str)] = &[
    ("asura", "28"),
    ("bahamut", "1"),
    ("bismark", "25"),
    ("carbuncle", "6"),
    ("cerberus", "23"),
    ("fenrir", "7"),
    ("lakshmi", "27"),
    ("leviathan", "11"),
    ("odin", "12"),
    ("phoenix", "5"),
    ("quetzalcoatl", "16"),
    ("ragnarok", "20"),
    ("shiva", "2"),
    ("siren", "17"),
    ("slyph", "8"),
    ("valefor", "9"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Server {
    name: &'static str,
    id: &'static str,
}

impl Server {
    pub fn all() -> impl Iterator<Item = Server> {
        SERVERS.iter().map(|&(name, id)| Server { name, id })
    }

    pub fn names() -> Vec<&'static str> {
        SERVERS.iter().map(|(name, _)| *name).collect()
    }

    pub fn by_id(id: &str) -> Option<Server> {
        Self::all().find(|s| s.id == id.trim())
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn id(&self) -> &'static str {
        self.id
    }
}

impl fmt::Display for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

impl FromStr for Server {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::all()
            .find(|srv| srv.name == wanted)
            .ok_or_else(|| format!("Unknown server: {s}"))
    }
}

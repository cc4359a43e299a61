//! Chemical elements
//!
//! Elements are identified by atomic number. Atomic number 0 is reserved for
//! sites whose element could not be determined (dummy atoms, lone pairs,
//! extra points).

use ahash::AHashMap;
use std::fmt;
use std::sync::OnceLock;

/// Chemical element, stored as its atomic number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Element(u8);

/// Symbol and standard atomic mass (Daltons), indexed by atomic number
const ELEMENT_DATA: [(&str, f64); ELEMENT_COUNT] = [
    ("", 0.0), ("H", 1.00794), ("He", 4.002602), ("Li", 6.941), ("Be", 9.012182),
    ("B", 10.811), ("C", 12.0107), ("N", 14.0067), ("O", 15.9994), ("F", 18.998403),
    ("Ne", 20.1797), ("Na", 22.98977), ("Mg", 24.305), ("Al", 26.981538), ("Si", 28.0855),
    ("P", 30.973761), ("S", 32.065), ("Cl", 35.453), ("Ar", 39.948), ("K", 39.0983),
    ("Ca", 40.078), ("Sc", 44.95591), ("Ti", 47.867), ("V", 50.9415), ("Cr", 51.9961),
    ("Mn", 54.938049), ("Fe", 55.845), ("Co", 58.9332), ("Ni", 58.6934), ("Cu", 63.546),
    ("Zn", 65.39), ("Ga", 69.723), ("Ge", 72.64), ("As", 74.9216), ("Se", 78.96),
    ("Br", 79.904), ("Kr", 83.8), ("Rb", 85.4678), ("Sr", 87.62), ("Y", 88.90585),
    ("Zr", 91.224), ("Nb", 92.90638), ("Mo", 95.94), ("Tc", 98.0), ("Ru", 101.07),
    ("Rh", 102.9055), ("Pd", 106.42), ("Ag", 107.8682), ("Cd", 112.411), ("In", 114.818),
    ("Sn", 118.71), ("Sb", 121.76), ("Te", 127.6), ("I", 126.90447), ("Xe", 131.293),
    ("Cs", 132.90545), ("Ba", 137.327), ("La", 138.9055), ("Ce", 140.116), ("Pr", 140.90765),
    ("Nd", 144.24), ("Pm", 145.0), ("Sm", 150.36), ("Eu", 151.964), ("Gd", 157.25),
    ("Tb", 158.92534), ("Dy", 162.5), ("Ho", 164.93032), ("Er", 167.259), ("Tm", 168.93421),
    ("Yb", 173.04), ("Lu", 174.967), ("Hf", 178.49), ("Ta", 180.9479), ("W", 183.84),
    ("Re", 186.207), ("Os", 190.23), ("Ir", 192.217), ("Pt", 195.078), ("Au", 196.96655),
    ("Hg", 200.59), ("Tl", 204.3833), ("Pb", 207.2), ("Bi", 208.98038), ("Po", 208.98),
    ("At", 209.99), ("Rn", 222.02), ("Fr", 223.02), ("Ra", 226.03), ("Ac", 227.03),
    ("Th", 232.0381), ("Pa", 231.03588), ("U", 238.02891), ("Np", 237.05), ("Pu", 244.06),
    ("Am", 243.06), ("Cm", 247.07), ("Bk", 247.07), ("Cf", 251.08), ("Es", 252.08),
    ("Fm", 257.1), ("Md", 258.1), ("No", 259.1), ("Lr", 262.11), ("Rf", 261.11),
    ("Db", 262.11), ("Sg", 266.12), ("Bh", 264.12), ("Hs", 269.13), ("Mt", 268.14),
    ("Ds", 281.0), ("Rg", 281.0), ("Cn", 285.0), ("Nh", 286.0), ("Fl", 289.0),
    ("Mc", 290.0), ("Lv", 293.0), ("Ts", 294.0), ("Og", 294.0),
];

/// Number of entries in the element table (including the unknown slot 0)
pub const ELEMENT_COUNT: usize = 119;

static SYMBOL_MAP: OnceLock<AHashMap<String, Element>> = OnceLock::new();

fn symbol_map() -> &'static AHashMap<String, Element> {
    SYMBOL_MAP.get_or_init(|| {
        let mut map = AHashMap::with_capacity(ELEMENT_COUNT + 2);
        for (n, (symbol, _)) in ELEMENT_DATA.iter().enumerate().skip(1) {
            map.insert(symbol.to_ascii_uppercase(), Element(n as u8));
        }
        // Deuterium is written as D in some deposited structures
        map.insert("D".to_string(), Element::HYDROGEN);
        map
    })
}

impl Element {
    /// Element could not be determined
    pub const UNKNOWN: Element = Element(0);
    pub const HYDROGEN: Element = Element(1);
    pub const CARBON: Element = Element(6);
    pub const NITROGEN: Element = Element(7);
    pub const OXYGEN: Element = Element(8);
    pub const SULFUR: Element = Element(16);
    pub const IRON: Element = Element(26);

    /// Look up an element by atomic number
    pub fn from_atomic_number(n: u8) -> Option<Self> {
        ((n as usize) < ELEMENT_COUNT).then_some(Element(n))
    }

    /// Look up an element by symbol, ignoring case and surrounding whitespace
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return None;
        }
        symbol_map().get(&symbol.to_ascii_uppercase()).copied()
    }

    #[inline]
    pub const fn atomic_number(&self) -> u8 {
        self.0
    }

    /// Element symbol in title case; empty for [`Element::UNKNOWN`]
    #[inline]
    pub fn symbol(&self) -> &'static str {
        ELEMENT_DATA[self.0 as usize].0
    }

    /// Standard atomic mass in Daltons
    #[inline]
    pub fn mass(&self) -> f64 {
        ELEMENT_DATA[self.0 as usize].1
    }

    #[inline]
    pub fn is_unknown(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_lookup() {
        assert_eq!(Element::from_symbol("C"), Some(Element::CARBON));
        assert_eq!(Element::from_symbol(" FE"), Some(Element::IRON));
        assert_eq!(Element::from_symbol("fe"), Some(Element::IRON));
        assert_eq!(Element::from_symbol("D"), Some(Element::HYDROGEN));
        assert_eq!(Element::from_symbol("Xx"), None);
        assert_eq!(Element::from_symbol("  "), None);
    }

    #[test]
    fn test_table_alignment() {
        assert_eq!(Element::from_atomic_number(8).map(|e| e.symbol()), Some("O"));
        assert_eq!(Element::from_atomic_number(118).map(|e| e.symbol()), Some("Og"));
        assert_eq!(Element::from_atomic_number(119), None);
        assert!((Element::CARBON.mass() - 12.0107).abs() < 1e-9);
        assert_eq!(Element::UNKNOWN.mass(), 0.0);
        assert_eq!(Element::SULFUR.to_string(), "S");
    }
}

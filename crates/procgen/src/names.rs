//! System names from prefix/suffix syllable tables.

use engine_core::Mulberry32;
use std::collections::HashSet;

const NAME_PREFIXES: [&str; 30] = [
    "Al", "Tau", "Sol", "Veg", "Sig", "Zet", "Eps", "Del", "Gam", "Omi",
    "The", "Lam", "Kap", "Phi", "Psi", "Rig", "Can", "Pro", "Arc", "Ant",
    "Bet", "Ald", "Cer", "Den", "Eri", "Fom", "Hyd", "Ind", "Lyn", "Nor",
];

const NAME_SUFFIXES: [&str; 30] = [
    "aris", "onis", "rae", "ebi", "ica", "ium", "ax", "ux", "ion", "eus",
    "ana", "ora", "uri", "ith", "enn", "ark", "oss", "eld", "urn", "ova",
    "ith", "ane", "ope", "ida", "ula", "erg", "ond", "ast", "ell", "ium",
];

/// Draws per name before falling back to a numbered variant.
const MAX_NAME_ATTEMPTS: usize = 200;

/// Generate `count` unique names. Collisions are rejected and redrawn.
pub fn generate_names(rng: &mut Mulberry32, count: usize) -> Vec<String> {
    let mut used = HashSet::with_capacity(count);
    let mut names = Vec::with_capacity(count);

    for i in 0..count {
        let mut name = draw_name(rng);
        let mut attempts = 1;
        while used.contains(&name) && attempts < MAX_NAME_ATTEMPTS {
            name = draw_name(rng);
            attempts += 1;
        }
        if used.contains(&name) {
            // Syllable space exhausted for very large galaxies.
            name = format!("{}-{}", name, i);
        }
        used.insert(name.clone());
        names.push(name);
    }

    names
}

fn draw_name(rng: &mut Mulberry32) -> String {
    let prefix = rng.pick(&NAME_PREFIXES).copied().unwrap_or("Nor");
    let suffix = rng.pick(&NAME_SUFFIXES).copied().unwrap_or("ova");
    format!("{}{}", prefix, suffix)
}

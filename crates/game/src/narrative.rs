//! Story overlay: a fixed directed graph of scenes advanced by one-shot milestones.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use procgen::FactionId;

use crate::player::PlayerShip;

/// Story log entries kept for display.
pub const MAX_NARRATIVE_EVENTS: usize = 20;

const FIRST_JUMP_SYSTEMS: usize = 2;
const TRADER_LIFE_SYSTEMS: usize = 5;
const FACTION_INVITE_REPUTATION: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Scene,
    Choice,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeNode {
    pub id: &'static str,
    pub kind: NodeKind,
    pub text: &'static str,
    pub color: &'static str,
}

const fn scene(id: &'static str, text: &'static str, color: &'static str) -> NarrativeNode {
    NarrativeNode { id, kind: NodeKind::Scene, text, color }
}

const fn choice(id: &'static str, text: &'static str, color: &'static str) -> NarrativeNode {
    NarrativeNode { id, kind: NodeKind::Choice, text, color }
}

static NODES: [NarrativeNode; 21] = [
    // Act 1
    scene("arrival", "Emergency landing. Hull damaged, credits low. Welcome to the frontier.", "#c8b4ff"),
    scene("first_trade", "First profit. Every credit counts out here.", "#4f4"),
    scene("first_jump", "Hyperspace jump complete. The galaxy opens up before you.", "#4af"),
    // Act 2
    scene("trader_life", "Trade routes established. But the frontier has its own rules...", "#c8b4ff"),
    scene("federation_contact", "Federation patrol. They want order. You want profit.", "#4af"),
    scene("pirate_encounter", "Pirates. They take what they want, unless you fight back.", "#f44"),
    scene("merchant_guild", "The Merchant Guild offers protection. For a price.", "#fd4"),
    scene("rebel_sympathy", "The Free Systems fight for independence. A worthy cause?", "#f84"),
    choice("distress_signal", "Distress signal detected. Help could bring allies... or trouble.", "#ff8"),
    choice("smuggler_offer", "Smuggling run. Big credits. Bigger consequences.", "#fa0"),
    choice("faction_choice", "Every faction wants your loyalty. Choose wisely.", "#c8b4ff"),
    // Act 3
    scene("artifact_rumor", "Whispers of an alien artifact. Something ancient. Something powerful.", "#f4f"),
    scene("artifact_found", "The artifact pulses with unknown energy. Everyone will want this.", "#f4f"),
    scene("artifact_hunted", "They know you have it. Every faction. Every pirate. Run.", "#f44"),
    choice("artifact_decision", "Deliver to the scientists? Sell for power? Your choice shapes the frontier.", "#c8b4ff"),
    // Act 4
    scene("pirate_king", "The Pirate King blocks your path. This ends now.", "#f44"),
    scene("final_run", "Final jump. The Science Enclave awaits. Hold together.", "#4ff"),
    scene("delivery", "The artifact is delivered. The frontier will never be the same.", "#4f4"),
    // Endings
    scene("victory_science", "Knowledge prevails. The frontier enters a new era of discovery.", "#4ff"),
    scene("victory_power", "Power seized. The frontier bows to a new authority.", "#fa0"),
    scene("defeat", "Lost in the void. The frontier claims another soul.", "#f44"),
];

static EDGES: [(&str, &str); 33] = [
    ("arrival", "first_trade"),
    ("first_trade", "first_jump"),
    ("first_jump", "trader_life"),
    ("trader_life", "federation_contact"),
    ("trader_life", "pirate_encounter"),
    ("trader_life", "merchant_guild"),
    ("federation_contact", "distress_signal"),
    ("pirate_encounter", "smuggler_offer"),
    ("merchant_guild", "faction_choice"),
    ("federation_contact", "faction_choice"),
    ("pirate_encounter", "faction_choice"),
    ("merchant_guild", "rebel_sympathy"),
    ("rebel_sympathy", "faction_choice"),
    ("distress_signal", "artifact_rumor"),
    ("distress_signal", "trader_life"),
    ("smuggler_offer", "artifact_rumor"),
    ("smuggler_offer", "trader_life"),
    ("faction_choice", "artifact_rumor"),
    ("artifact_rumor", "artifact_found"),
    ("artifact_found", "artifact_hunted"),
    ("artifact_hunted", "artifact_decision"),
    ("artifact_decision", "pirate_king"),
    ("artifact_decision", "final_run"),
    ("pirate_king", "final_run"),
    ("final_run", "delivery"),
    ("delivery", "victory_science"),
    ("delivery", "victory_power"),
    ("arrival", "defeat"),
    ("trader_life", "defeat"),
    ("pirate_encounter", "defeat"),
    ("artifact_hunted", "defeat"),
    ("pirate_king", "defeat"),
    ("final_run", "defeat"),
];

pub fn node(id: &str) -> Option<&'static NarrativeNode> {
    NODES.iter().find(|n| n.id == id)
}

pub fn nodes() -> &'static [NarrativeNode] {
    &NODES
}

pub fn has_edge(from: &str, to: &str) -> bool {
    EDGES.iter().any(|&(a, b)| a == from && b == to)
}

pub fn edges_from(from: &str) -> impl Iterator<Item = &'static str> + '_ {
    EDGES.iter().filter(move |(a, _)| *a == from).map(|&(_, b)| b)
}

/// Gameplay moments that advance the story. Each fires at most once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Milestone {
    Arrival,
    FirstTrade,
    FirstJump,
    TraderLife,
    FederationContact,
    PirateEncounter,
    MerchantGuild,
    RebelSympathy,
    Defeat,
}

impl Milestone {
    pub fn node_id(self) -> &'static str {
        match self {
            Milestone::Arrival => "arrival",
            Milestone::FirstTrade => "first_trade",
            Milestone::FirstJump => "first_jump",
            Milestone::TraderLife => "trader_life",
            Milestone::FederationContact => "federation_contact",
            Milestone::PirateEncounter => "pirate_encounter",
            Milestone::MerchantGuild => "merchant_guild",
            Milestone::RebelSympathy => "rebel_sympathy",
            Milestone::Defeat => "defeat",
        }
    }
}

/// A node change produced by a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Option<&'static str>,
    pub to: &'static str,
    pub text: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Default)]
pub struct Narrative {
    current: Option<&'static str>,
    fired: BTreeSet<Milestone>,
    events: VecDeque<Transition>,
    variables: BTreeMap<String, i64>,
}

impl Narrative {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&'static NarrativeNode> {
        self.current.and_then(node)
    }

    pub fn has_fired(&self, milestone: Milestone) -> bool {
        self.fired.contains(&milestone)
    }

    /// Most recent story entries, oldest first.
    pub fn events(&self) -> impl Iterator<Item = &Transition> {
        self.events.iter()
    }

    pub fn variable(&self, name: &str) -> Option<i64> {
        self.variables.get(name).copied()
    }

    /// Fire a milestone. Returns the transition the first time, `None` after that.
    /// A jump with no edge from the current node is logged and taken anyway.
    pub fn trigger(&mut self, milestone: Milestone) -> Option<Transition> {
        if !self.fired.insert(milestone) {
            return None;
        }
        let target = node(milestone.node_id())?;
        if let Some(from) = self.current {
            if !has_edge(from, target.id) {
                log::warn!("Narrative: no edge {} -> {}", from, target.id);
            }
        }

        let transition = Transition {
            from: self.current,
            to: target.id,
            text: target.text,
            color: target.color,
        };
        self.current = Some(target.id);
        self.events.push_back(transition);
        while self.events.len() > MAX_NARRATIVE_EVENTS {
            self.events.pop_front();
        }
        log::info!("Narrative: {}", target.id);
        Some(transition)
    }

    /// Check the player-driven milestones and fire any that are now due.
    pub fn evaluate(&mut self, player: &PlayerShip) -> Vec<Transition> {
        let due = [
            (Milestone::FirstTrade, player.sales > 0),
            (Milestone::FirstJump, player.visited.len() >= FIRST_JUMP_SYSTEMS),
            (Milestone::TraderLife, player.visited.len() >= TRADER_LIFE_SYSTEMS),
            (
                Milestone::MerchantGuild,
                player.reputation(FactionId::Merchants) >= FACTION_INVITE_REPUTATION,
            ),
            (
                Milestone::RebelSympathy,
                player.reputation(FactionId::Rebels) >= FACTION_INVITE_REPUTATION,
            ),
        ];
        due.into_iter()
            .filter(|&(_, ready)| ready)
            .filter_map(|(milestone, _)| self.trigger(milestone))
            .collect()
    }

    /// Mirror player progress into the story variables.
    pub fn sync_variables(&mut self, player: &PlayerShip) {
        let mut set = |name: &str, value: i64| {
            self.variables.insert(name.to_string(), value);
        };
        set("credits_earned", player.credits_earned);
        set("systems_visited", player.visited.len() as i64);
        set("kills", i64::from(player.kills));
        set("missions_completed", i64::from(player.missions_completed));
        for faction in FactionId::ALL {
            set(&format!("faction_{}", faction.key()), i64::from(player.reputation(faction)));
        }
    }
}

//! Dungeon orchestration: where the player stands, where they are headed,
//! and what they can do next.

use crate::character::Character;
use crate::dice::DiceSource;
use crate::error::WorldError;
use crate::items::Item;
use crate::rules::{Action, Resolution, RulesEngine};
use crate::world::{Chamber, ChamberGraph, ChamberId};
use serde::{Deserialize, Serialize};

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Reached the goal chamber alive.
    Victory,
    /// The player died.
    Defeat,
}

/// A running game: one player in a chamber graph, walking toward a goal.
///
/// The game is finished once the player is dead or standing in the goal
/// chamber.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "DungeonState")]
pub struct Dungeon {
    graph: ChamberGraph,
    player: Character,
    current: ChamberId,
    goal: ChamberId,
}

/// Unchecked wire form of a [`Dungeon`]. Deserialized dungeons pass through
/// [`Dungeon::new`] so their chamber ids are validated like any other.
#[derive(Deserialize)]
struct DungeonState {
    graph: ChamberGraph,
    player: Character,
    current: ChamberId,
    goal: ChamberId,
}

impl TryFrom<DungeonState> for Dungeon {
    type Error = WorldError;

    fn try_from(state: DungeonState) -> Result<Self, Self::Error> {
        Dungeon::new(state.player, state.graph, state.current, state.goal)
    }
}

impl Dungeon {
    pub fn new(
        player: Character,
        graph: ChamberGraph,
        start: ChamberId,
        goal: ChamberId,
    ) -> Result<Self, WorldError> {
        for chamber in [start, goal] {
            if !graph.contains(chamber) {
                return Err(WorldError::UnknownChamber(chamber));
            }
        }
        Ok(Self {
            graph,
            player,
            current: start,
            goal,
        })
    }

    pub fn player(&self) -> &Character {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Character {
        &mut self.player
    }

    pub fn graph(&self) -> &ChamberGraph {
        &self.graph
    }

    pub(crate) fn graph_mut(&mut self) -> &mut ChamberGraph {
        &mut self.graph
    }

    pub fn current_chamber(&self) -> ChamberId {
        self.current
    }

    /// The chamber the player is standing in.
    pub fn current(&self) -> &Chamber {
        // `current` is validated on every assignment and chambers are never
        // removed from the graph
        &self.graph.chambers()[self.current.index()]
    }

    pub fn goal_chamber(&self) -> ChamberId {
        self.goal
    }

    pub fn set_current_chamber(&mut self, chamber: ChamberId) -> Result<(), WorldError> {
        if !self.graph.contains(chamber) {
            return Err(WorldError::UnknownChamber(chamber));
        }
        tracing::info!(from = %self.current, to = %chamber, "player changed chamber");
        self.current = chamber;
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        !self.player.is_alive() || self.current == self.goal
    }

    /// `None` while the game is still running.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.player.is_alive() {
            Some(Outcome::Defeat)
        } else if self.current == self.goal {
            Some(Outcome::Victory)
        } else {
            None
        }
    }

    /// Every legal action in the current chamber.
    ///
    /// Doors come first, in the order they were connected: a Move through
    /// an open door, a Fight against the guardian of a locked one. Then one
    /// Pick per item, in the order the items were placed. Drivers select by
    /// index into this list, so the order is stable as long as the dungeon
    /// is not mutated.
    pub fn actions(&self) -> Vec<Action> {
        let doors = self.graph.doors_of(self.current).map(|door| match door.guardian() {
            Some(guardian) if door.is_locked() => Action::Fight {
                door: door.id,
                monster: guardian.id,
            },
            _ => Action::Move { door: door.id },
        });
        let items = self
            .current()
            .items()
            .iter()
            .map(|item| Action::Pick { item: item.id });

        let actions: Vec<Action> = doors.chain(items).collect();
        tracing::debug!(chamber = %self.current, count = actions.len(), "enumerated actions");
        actions
    }

    /// Resolve `action` and apply its effects.
    pub fn execute<D: DiceSource + ?Sized>(&mut self, action: &Action, dice: &mut D) -> Resolution {
        RulesEngine::new().execute(self, action, dice)
    }
}

/// Build the standard five-chamber dungeon around `player`.
///
/// ```text
/// [0] --- [1: Axe] --Goblin-- [2: Shield] --Spider-- [3] --- [4: goal]
/// ```
///
/// The Goblin fights on strength 1 with 3 health, the Spider on craft 3 with
/// 5 health. The player starts in chamber 0.
pub fn create_standard_dungeon(player: Character) -> Result<Dungeon, WorldError> {
    let mut graph = ChamberGraph::new();
    let entrance = graph.add_chamber();
    let armory = graph.add_chamber_with_item(Item::axe());
    let guardroom = graph.add_chamber_with_item(Item::shield());
    let lair = graph.add_chamber();
    let goal = graph.add_chamber();

    graph.connect(entrance, armory)?;
    graph.connect_guarded(armory, guardroom, Character::monster("Goblin", 1, 0, 3))?;
    graph.connect_guarded(guardroom, lair, Character::monster("Spider", 0, 3, 5))?;
    graph.connect(lair, goal)?;

    Dungeon::new(player, graph, entrance, goal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_room_dungeon() -> (Dungeon, ChamberId, ChamberId) {
        let mut graph = ChamberGraph::new();
        let start = graph.add_chamber();
        let goal = graph.add_chamber();
        let dungeon = Dungeon::new(Character::wizard("Gandalf"), graph, start, goal).unwrap();
        (dungeon, start, goal)
    }

    #[test]
    fn test_dungeon_initialization() {
        let (dungeon, start, goal) = two_room_dungeon();
        assert_eq!(dungeon.player().name, "Gandalf");
        assert_eq!(dungeon.current_chamber(), start);
        assert_eq!(dungeon.goal_chamber(), goal);
        assert!(!dungeon.is_finished());
        assert_eq!(dungeon.outcome(), None);
    }

    #[test]
    fn test_new_rejects_unknown_chambers() {
        let mut other = ChamberGraph::new();
        for _ in 0..3 {
            other.add_chamber();
        }
        let stranger = other.add_chamber();

        let mut graph = ChamberGraph::new();
        let start = graph.add_chamber();
        let result = Dungeon::new(Character::wizard("Gandalf"), graph, start, stranger);
        assert_eq!(result.err(), Some(WorldError::UnknownChamber(stranger)));
    }

    #[test]
    fn test_set_current_chamber() {
        let mut graph = ChamberGraph::new();
        let start = graph.add_chamber();
        let side = graph.add_chamber();
        let goal = graph.add_chamber();
        let mut dungeon = Dungeon::new(Character::wizard("Gandalf"), graph, start, goal).unwrap();

        dungeon.set_current_chamber(side).unwrap();
        assert_eq!(dungeon.current_chamber(), side);
        assert!(!dungeon.is_finished());
    }

    #[test]
    fn test_finish_at_goal() {
        let (mut dungeon, _, goal) = two_room_dungeon();
        dungeon.set_current_chamber(goal).unwrap();
        assert!(dungeon.is_finished());
        assert_eq!(dungeon.outcome(), Some(Outcome::Victory));
    }

    #[test]
    fn test_finish_on_death() {
        let (mut dungeon, _, _) = two_room_dungeon();
        dungeon.player_mut().take_damage(100);
        assert!(dungeon.is_finished());
        assert_eq!(dungeon.outcome(), Some(Outcome::Defeat));
    }

    #[test]
    fn test_death_at_goal_is_defeat() {
        let (mut dungeon, _, goal) = two_room_dungeon();
        dungeon.set_current_chamber(goal).unwrap();
        dungeon.player_mut().take_damage(100);
        assert_eq!(dungeon.outcome(), Some(Outcome::Defeat));
    }

    #[test]
    fn test_actions_empty_chamber() {
        let (dungeon, _, _) = two_room_dungeon();
        assert!(dungeon.actions().is_empty());
    }

    #[test]
    fn test_actions_unguarded_door() {
        let mut graph = ChamberGraph::new();
        let start = graph.add_chamber();
        let goal = graph.add_chamber();
        let door = graph.connect(start, goal).unwrap();
        let dungeon = Dungeon::new(Character::wizard("Gandalf"), graph, start, goal).unwrap();

        assert_eq!(dungeon.actions(), vec![Action::Move { door }]);
    }

    #[test]
    fn test_actions_guarded_door() {
        let mut graph = ChamberGraph::new();
        let start = graph.add_chamber();
        let goal = graph.add_chamber();
        let goblin = Character::monster("Goblin", 3, 0, 5);
        let monster = goblin.id;
        let door = graph.connect_guarded(start, goal, goblin).unwrap();
        let dungeon = Dungeon::new(Character::wizard("Gandalf"), graph, start, goal).unwrap();

        assert_eq!(dungeon.actions(), vec![Action::Fight { door, monster }]);
    }

    #[test]
    fn test_actions_items() {
        let mut graph = ChamberGraph::new();
        let axe = Item::axe();
        let start = graph.add_chamber_with_item(axe.clone());
        let goal = graph.add_chamber();
        let dungeon = Dungeon::new(Character::wizard("Gandalf"), graph, start, goal).unwrap();

        assert_eq!(dungeon.actions(), vec![Action::Pick { item: axe.id }]);
    }

    #[test]
    fn test_actions_doors_before_items() {
        let mut graph = ChamberGraph::new();
        let shield = Item::shield();
        let axe = Item::axe();
        let start = graph.add_chamber_with_item(shield.clone());
        graph.place_item(start, axe.clone()).unwrap();
        let north = graph.add_chamber();
        let south = graph.add_chamber();
        let spider = Character::monster("Spider", 0, 3, 5);
        let spider_id = spider.id;
        let first = graph.connect_guarded(start, north, spider).unwrap();
        let second = graph.connect(south, start).unwrap();
        let dungeon = Dungeon::new(Character::wizard("Gandalf"), graph, start, south).unwrap();

        assert_eq!(
            dungeon.actions(),
            vec![
                Action::Fight {
                    door: first,
                    monster: spider_id
                },
                Action::Move { door: second },
                Action::Pick { item: shield.id },
                Action::Pick { item: axe.id },
            ]
        );
        // Stable without intervening mutation
        assert_eq!(dungeon.actions(), dungeon.actions());
    }

    #[test]
    fn test_serde_round_trip() {
        let mut dungeon = create_standard_dungeon(Character::wizard("Gandalf")).unwrap();
        let armory = dungeon.graph().chambers()[1].id;
        dungeon.set_current_chamber(armory).unwrap();

        let json = serde_json::to_string(&dungeon).unwrap();
        let restored: Dungeon = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.current_chamber(), armory);
        assert_eq!(restored.actions(), dungeon.actions());
    }

    #[test]
    fn test_deserialize_rejects_unknown_chambers() {
        let dungeon = create_standard_dungeon(Character::wizard("Gandalf")).unwrap();
        let mut value = serde_json::to_value(&dungeon).unwrap();
        value["current"] = serde_json::json!(99);

        let result = serde_json::from_value::<Dungeon>(value.clone());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("No such chamber: chamber 99"), "{err}");

        value["current"] = serde_json::json!(0);
        value["goal"] = serde_json::json!(5);
        assert!(serde_json::from_value::<Dungeon>(value).is_err());
    }

    #[test]
    fn test_standard_dungeon_layout() {
        let dungeon = create_standard_dungeon(Character::wizard("Gandalf")).unwrap();
        let graph = dungeon.graph();

        assert_eq!(graph.chambers().len(), 5);
        assert_eq!(graph.doors().len(), 4);
        assert_eq!(dungeon.current_chamber().index(), 0);
        assert_eq!(dungeon.goal_chamber().index(), 4);

        assert_eq!(graph.chambers()[1].items()[0].name, "Axe");
        assert_eq!(graph.chambers()[2].items()[0].name, "Shield");

        let goblin = graph.doors()[1].guardian().unwrap();
        assert_eq!(
            (goblin.strength(), goblin.craft(), goblin.health()),
            (1, 0, 3)
        );
        let spider = graph.doors()[2].guardian().unwrap();
        assert_eq!(
            (spider.strength(), spider.craft(), spider.health()),
            (0, 3, 5)
        );
        assert!(!graph.doors()[0].is_locked());
        assert!(!graph.doors()[3].is_locked());
    }
}

use serde::{Deserialize, Serialize};

/// The same piece of text in English and Simplified Chinese.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilingualString {
    pub en: String,
    pub zh: String,
}

impl BilingualString {
    pub fn new(en: impl Into<String>, zh: impl Into<String>) -> Self {
        BilingualString {
            en: en.into(),
            zh: zh.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitledSection {
    pub title: BilingualString,
    pub description: BilingualString,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub name: BilingualString,
    pub usage: BilingualString,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameBoards {
    pub title: BilingualString,
    pub board_a: Board,
    pub board_b: Board,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginAndTeardown {
    pub title: BilingualString,
    pub teardown: BilingualString,
    pub story: BilingualString,
}

/// The bilingual "language-game manual" generated for one word.
///
/// The shape is fixed: every provider must produce exactly these sections,
/// and every leaf is a [`BilingualString`]. Unknown fields in a provider reply
/// are dropped during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameManual {
    pub target_word: BilingualString,
    pub core_game: TitledSection,
    pub game_boards: GameBoards,
    pub origin_and_teardown: OriginAndTeardown,
    pub foul_warning: TitledSection,
    pub mastery_tip: TitledSection,
}

impl GameManual {
    /// Every leaf of the document paired with its JSON path.
    pub fn leaves(&self) -> Vec<(&'static str, &BilingualString)> {
        vec![
            ("targetWord", &self.target_word),
            ("coreGame.title", &self.core_game.title),
            ("coreGame.description", &self.core_game.description),
            ("gameBoards.title", &self.game_boards.title),
            ("gameBoards.boardA.name", &self.game_boards.board_a.name),
            ("gameBoards.boardA.usage", &self.game_boards.board_a.usage),
            ("gameBoards.boardB.name", &self.game_boards.board_b.name),
            ("gameBoards.boardB.usage", &self.game_boards.board_b.usage),
            ("originAndTeardown.title", &self.origin_and_teardown.title),
            ("originAndTeardown.teardown", &self.origin_and_teardown.teardown),
            ("originAndTeardown.story", &self.origin_and_teardown.story),
            ("foulWarning.title", &self.foul_warning.title),
            ("foulWarning.description", &self.foul_warning.description),
            ("masteryTip.title", &self.mastery_tip.title),
            ("masteryTip.description", &self.mastery_tip.description),
        ]
    }

    /// Returns the path of the first leaf with a blank `en` or `zh`, if any.
    pub fn first_blank_leaf(&self) -> Option<String> {
        self.leaves().into_iter().find_map(|(path, leaf)| {
            if leaf.en.trim().is_empty() {
                Some(format!("{}.en", path))
            } else if leaf.zh.trim().is_empty() {
                Some(format!("{}.zh", path))
            } else {
                None
            }
        })
    }
}

/// A provider that can be selected by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    pub id: String,
    pub name: String,
}

/// The configured providers in priority order, plus the default choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub providers: Vec<ProviderDescriptor>,
    pub default: Option<String>,
}

/// A generated manual tagged with the name of the provider that wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    #[serde(flatten)]
    pub manual: GameManual,
    pub provider: String,
}

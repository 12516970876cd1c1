// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::types::card::Card;

/// A named predicate selecting cards by their progress flags.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Unlearned,
    Learned,
    Starred,
}

impl Filter {
    pub const ALL: [Filter; 4] = [
        Filter::All,
        Filter::Unlearned,
        Filter::Learned,
        Filter::Starred,
    ];

    pub fn keeps(self, card: &Card) -> bool {
        match self {
            Filter::All => true,
            Filter::Unlearned => !card.learned(),
            Filter::Learned => card.learned(),
            Filter::Starred => card.starred(),
        }
    }

    /// The label shown on the filter control.
    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Unlearned => "Unlearned",
            Filter::Learned => "Learned",
            Filter::Starred => "Starred",
        }
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Filter::All => write!(f, "all"),
            Filter::Unlearned => write!(f, "unlearned"),
            Filter::Learned => write!(f, "learned"),
            Filter::Starred => write!(f, "starred"),
        }
    }
}

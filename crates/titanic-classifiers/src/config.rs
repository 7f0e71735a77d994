use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Seed used by the random baseline when none is configured.
pub const DEFAULT_RANDOM_SEED: u64 = 1234;

/// Split quality measure for the decision tree.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SplitCriterion {
    Gini,
    Entropy,
}

/// Supported classifiers and their hyper-parameters.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    MajorityVote,
    Random {
        seed: u64,
        /// Number of most frequent classes kept in the fitted distribution.
        max_classes: usize,
    },
    DecisionTree {
        criterion: SplitCriterion,
        max_depth: Option<usize>,
    },
    KNeighbors {
        n_neighbors: usize,
    },
}

impl Default for ModelType {
    fn default() -> Self {
        ModelType::MajorityVote
    }
}

impl ModelType {
    pub fn random() -> Self {
        ModelType::Random {
            seed: DEFAULT_RANDOM_SEED,
            max_classes: 2,
        }
    }

    pub fn entropy_tree(max_depth: Option<usize>) -> Self {
        ModelType::DecisionTree {
            criterion: SplitCriterion::Entropy,
            max_depth,
        }
    }

    pub fn knn(n_neighbors: usize) -> Self {
        ModelType::KNeighbors { n_neighbors }
    }

    /// Short identifier, also accepted by `FromStr`.
    pub fn short_name(&self) -> &'static str {
        match self {
            ModelType::MajorityVote => "majority",
            ModelType::Random { .. } => "random",
            ModelType::DecisionTree { .. } => "tree",
            ModelType::KNeighbors { .. } => "knn",
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelType::MajorityVote => write!(f, "MajorityVote"),
            ModelType::Random { seed, .. } => write!(f, "Random(seed={})", seed),
            ModelType::DecisionTree {
                criterion,
                max_depth,
            } => match max_depth {
                Some(depth) => write!(f, "DecisionTree({:?}, max_depth={})", criterion, depth),
                None => write!(f, "DecisionTree({:?})", criterion),
            },
            ModelType::KNeighbors { n_neighbors } => write!(f, "KNeighbors(k={})", n_neighbors),
        }
    }
}

impl FromStr for ModelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "majority" | "majority_vote" => Ok(ModelType::MajorityVote),
            "random" => Ok(ModelType::random()),
            "tree" | "decision_tree" => Ok(ModelType::entropy_tree(None)),
            "knn" | "kneighbors" => Ok(ModelType::knn(5)),
            _ => Err(format!(
                "Unknown model type: {}. Valid options are: majority, random, tree, knn",
                s
            )),
        }
    }
}

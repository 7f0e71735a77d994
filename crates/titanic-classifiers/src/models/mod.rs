pub mod classifier_trait;
pub mod decision_tree;
pub mod factory;
pub mod knn;
pub mod majority_vote;
pub mod random;
pub mod utils;

pub use classifier_trait::Classifier;
pub use decision_tree::DecisionTreeClassifier;
pub use knn::KNeighborsClassifier;
pub use majority_vote::MajorityVoteClassifier;
pub use random::RandomClassifier;

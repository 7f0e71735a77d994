use crate::config::ModelType;
use crate::models::classifier_trait::Classifier;
use crate::models::decision_tree::DecisionTreeClassifier;
use crate::models::knn::KNeighborsClassifier;
use crate::models::majority_vote::MajorityVoteClassifier;
use crate::models::random::RandomClassifier;

/// Build an untrained, boxed classifier from a `ModelType`.
pub fn build_model(model_type: &ModelType) -> Box<dyn Classifier> {
    match model_type {
        ModelType::MajorityVote => Box::new(MajorityVoteClassifier::new()),
        ModelType::Random { seed, max_classes } => {
            Box::new(RandomClassifier::with_params(*seed, *max_classes))
        }
        ModelType::DecisionTree {
            criterion,
            max_depth,
        } => Box::new(DecisionTreeClassifier::new(*criterion, *max_depth)),
        ModelType::KNeighbors { n_neighbors } => Box::new(KNeighborsClassifier::new(*n_neighbors)),
    }
}

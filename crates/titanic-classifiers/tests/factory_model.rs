use titanic_classifiers::config::ModelType;
use titanic_classifiers::math::{Array1, Array2};
use titanic_classifiers::models::factory;

#[test]
fn test_factory_builds_and_predicts() {
    // tiny dataset
    let x = Array2::from_shape_vec(
        (6, 2),
        vec![
            1.0, 0.0, // class 1
            0.0, 1.0, // class 0
            1.0, 0.1, // class 1
            0.0, 0.9, // class 0
            1.1, 0.0, // class 1
            0.0, 1.2, // class 0
        ],
    )
    .expect("failed to create feature matrix");
    let y = Array1::from_vec(vec![1, 0, 1, 0, 1, 0]);

    for model_type in [
        ModelType::MajorityVote,
        ModelType::random(),
        ModelType::entropy_tree(Some(3)),
        ModelType::knn(3),
    ] {
        let mut model = factory::build_model(&model_type);
        assert!(model.predict(&x).is_err(), "{} predicted before fit", model_type);
        model.fit(&x, &y).unwrap();
        let y_pred = model.predict(&x).unwrap();
        assert_eq!(y_pred.len(), x.nrows());
    }
}

#[test]
fn library_models_separate_easy_classes() {
    let x = Array2::from_shape_vec(
        (6, 2),
        vec![1.0, 0.0, 0.0, 1.0, 1.0, 0.1, 0.0, 0.9, 1.1, 0.0, 0.0, 1.2],
    )
    .unwrap();
    let y = Array1::from_vec(vec![1, 0, 1, 0, 1, 0]);

    for model_type in [ModelType::entropy_tree(None), ModelType::knn(1)] {
        let mut model = factory::build_model(&model_type);
        model.fit(&x, &y).unwrap();
        assert_eq!(model.predict(&x).unwrap(), y, "{}", model_type);
    }
}

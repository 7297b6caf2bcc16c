/// Integration tests for the application layer
mod test_utilities;

use std::collections::BTreeSet;
use std::path::PathBuf;
use test_utilities::mocks::*;
use rambo::prelude::*;

fn request() -> PlanRequest {
    PlanRequest::new(PathBuf::from("recipes"), "linux-64")
}

fn local_channel() -> Option<ChannelLocation> {
    Some(ChannelLocation::Local(PathBuf::from("/srv/channel")))
}

fn order_of(response: &PlanResponse) -> Vec<&str> {
    response
        .emitted_records()
        .iter()
        .map(RecipeRecord::name)
        .collect()
}

fn ids(error: &anyhow::Error) -> Vec<String> {
    error
        .downcast_ref::<PlanningError>()
        .expect("expected a planning error")
        .ids()
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[tokio::test]
async fn test_dependency_is_built_first() {
    let source = MockRecipeSource::new()
        .with_recipe("b", &["a"], &["b.pkg"])
        .with_recipe("a", &[], &["a.pkg"]);
    let use_case = PlanBuildUseCase::new(source, MockChannelRepository::new(), MockProgressReporter::new());

    let response = use_case.execute(request()).await.unwrap();

    assert_eq!(order_of(&response), vec!["a", "b"]);
    assert!(response.cull.is_none());
    assert!(response.channel.is_none());
}

#[tokio::test]
async fn test_two_recipe_cycle_fails() {
    let source = MockRecipeSource::new()
        .with_recipe("a", &["b"], &["a.pkg"])
        .with_recipe("b", &["a"], &["b.pkg"]);
    let use_case = PlanBuildUseCase::new(source, MockChannelRepository::new(), MockProgressReporter::new());

    let err = use_case.execute(request()).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<PlanningError>(),
        Some(PlanningError::CyclicDependency { .. })
    ));
    assert_eq!(ids(&err), vec!["a", "b"]);
}

#[tokio::test]
async fn test_cull_removes_recipe_already_in_channel() {
    let source = MockRecipeSource::new()
        .with_recipe("a", &[], &["a.pkg"])
        .with_recipe("b", &["a"], &["b.pkg"]);
    let channel = MockChannelRepository::new().with_artifacts(&["a.pkg"]);
    let use_case = PlanBuildUseCase::new(source, channel.clone(), MockProgressReporter::new());

    let response = use_case
        .execute(request().with_channel(local_channel()).with_cull(true))
        .await
        .unwrap();

    assert_eq!(order_of(&response), vec!["b"]);
    let outcome = response.cull.as_ref().unwrap();
    assert!(outcome.is_removed("a"));
    assert_eq!(outcome.removed().len(), 1);
    assert_eq!(outcome.reduced_graph().edge_count(), 0);
    assert_eq!(channel.fetch_count(), 1);
}

#[tokio::test]
async fn test_dependency_outside_collection_is_ignored() {
    let source = MockRecipeSource::new().with_recipe("a", &["x"], &["a.pkg"]);
    let use_case = PlanBuildUseCase::new(source, MockChannelRepository::new(), MockProgressReporter::new());

    let response = use_case.execute(request()).await.unwrap();

    assert_eq!(order_of(&response), vec!["a"]);
    assert_eq!(response.graph.edge_count(), 0);
    assert_eq!(response.emitted_records()[0].declared_dependency_count(), 1);
}

#[tokio::test]
async fn test_order_independent_of_discovery_order() {
    let forward = MockRecipeSource::new()
        .with_recipe("zlib", &[], &["zlib.pkg"])
        .with_recipe("openssl", &["zlib"], &["openssl.pkg"])
        .with_recipe("curl", &["openssl", "zlib"], &["curl.pkg"])
        .with_recipe("libxml2", &["zlib"], &["libxml2.pkg"])
        .with_recipe("bzip2", &[], &["bzip2.pkg"]);
    let reversed = MockRecipeSource::new()
        .with_recipe("bzip2", &[], &["bzip2.pkg"])
        .with_recipe("libxml2", &["zlib"], &["libxml2.pkg"])
        .with_recipe("curl", &["openssl", "zlib"], &["curl.pkg"])
        .with_recipe("openssl", &["zlib"], &["openssl.pkg"])
        .with_recipe("zlib", &[], &["zlib.pkg"]);

    let first = PlanBuildUseCase::new(forward, MockChannelRepository::new(), MockProgressReporter::new())
        .execute(request())
        .await
        .unwrap();
    let second = PlanBuildUseCase::new(reversed, MockChannelRepository::new(), MockProgressReporter::new())
        .execute(request())
        .await
        .unwrap();

    let expected = vec!["bzip2", "zlib", "libxml2", "openssl", "curl"];
    assert_eq!(order_of(&first), expected);
    assert_eq!(order_of(&second), expected);
}

#[tokio::test]
async fn test_cycle_reports_blocked_recipes() {
    let source = MockRecipeSource::new()
        .with_recipe("base", &[], &["base.pkg"])
        .with_recipe("a", &["b", "base"], &["a.pkg"])
        .with_recipe("b", &["a"], &["b.pkg"])
        .with_recipe("app", &["a"], &["app.pkg"]);
    let use_case = PlanBuildUseCase::new(source, MockChannelRepository::new(), MockProgressReporter::new());

    let err = use_case.execute(request()).await.unwrap_err();

    assert_eq!(ids(&err), vec!["a", "app", "b"]);
}

#[tokio::test]
async fn test_duplicate_identities_are_all_reported() {
    let source = MockRecipeSource::new()
        .with_recipe("a", &[], &["a.pkg"])
        .with_entry(
            "a-copy",
            RecipeEntry::Loaded(RecipeRecord::from_parts("a", Vec::<String>::new(), ["a2.pkg"]).unwrap()),
        )
        .with_recipe("b", &[], &["b.pkg"])
        .with_entry(
            "b-copy",
            RecipeEntry::Loaded(RecipeRecord::from_parts("b", Vec::<String>::new(), ["b2.pkg"]).unwrap()),
        );
    let use_case = PlanBuildUseCase::new(source, MockChannelRepository::new(), MockProgressReporter::new());

    let err = use_case.execute(request()).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<PlanningError>(),
        Some(PlanningError::DuplicateIdentity { .. })
    ));
    assert_eq!(ids(&err), vec!["a", "b"]);
}

#[tokio::test]
async fn test_self_dependency_fails() {
    let source = MockRecipeSource::new().with_recipe("a", &["a"], &["a.pkg"]);
    let use_case = PlanBuildUseCase::new(source, MockChannelRepository::new(), MockProgressReporter::new());

    let err = use_case.execute(request()).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<PlanningError>(),
        Some(PlanningError::SelfDependency { .. })
    ));
}

#[tokio::test]
async fn test_culled_sequence_is_valid_for_reduced_graph() {
    let source = MockRecipeSource::new()
        .with_recipe("core", &[], &["core.pkg"])
        .with_recipe("lib", &["core"], &["lib.pkg"])
        .with_recipe("util", &["core"], &["util.pkg"])
        .with_recipe("app", &["lib", "util"], &["app.pkg"])
        .with_recipe("multi", &["app"], &["multi-py311.pkg", "multi-py312.pkg"]);
    let channel = MockChannelRepository::new().with_artifacts(&["core.pkg", "util.pkg", "multi-py311.pkg"]);
    let use_case = PlanBuildUseCase::new(source, channel, MockProgressReporter::new());

    let response = use_case
        .execute(request().with_channel(local_channel()).with_cull(true))
        .await
        .unwrap();

    assert_eq!(order_of(&response), vec!["lib", "app", "multi"]);
    let outcome = response.cull.as_ref().unwrap();
    let removed: BTreeSet<String> = outcome.removed().iter().map(ToString::to_string).collect();
    assert_eq!(removed, BTreeSet::from(["core".to_string(), "util".to_string()]));
    assert!(outcome.reduced_graph().is_valid_order(&outcome.order()));
}

#[tokio::test]
async fn test_cull_without_channel_fails() {
    let source = MockRecipeSource::new().with_recipe("a", &[], &["a.pkg"]);
    let use_case = PlanBuildUseCase::new(source, MockChannelRepository::new(), MockProgressReporter::new());

    let err = use_case.execute(request().with_cull(true)).await.unwrap_err();

    assert!(err.to_string().contains("Culling requires a channel"));
}

#[tokio::test]
async fn test_manifest_selection_and_warnings() {
    let source = MockRecipeSource::new()
        .with_recipe("core", &[], &["core.pkg"])
        .with_recipe("lib", &["core"], &["lib.pkg"])
        .with_recipe("docs", &["lib"], &["docs.pkg"]);
    let reporter = MockProgressReporter::new();
    let use_case = PlanBuildUseCase::new(source, MockChannelRepository::new(), reporter.clone());

    let include = BTreeSet::from(["core".to_string(), "lib".to_string(), "ghost".to_string()]);
    let response = use_case
        .execute(request().with_include(Some(include)))
        .await
        .unwrap();

    assert_eq!(order_of(&response), vec!["core", "lib"]);
    let errors = reporter.errors();
    assert!(errors.iter().any(|m| m.contains("'ghost'")));
}

#[tokio::test]
async fn test_read_model_reports_channel_status() {
    let source = MockRecipeSource::new()
        .with_recipe("a", &[], &["a.pkg"])
        .with_recipe("b", &["a"], &["b.pkg"]);
    let channel = MockChannelRepository::new().with_artifacts(&["a.pkg"]);
    let use_case = PlanBuildUseCase::new(source, channel, MockProgressReporter::new());

    let response = use_case
        .execute(request().with_channel(local_channel()).with_channel_status(true))
        .await
        .unwrap();
    let model = BuildPlanReadModelBuilder::build(&response);

    assert_eq!(model.order, vec!["a", "b"]);
    assert_eq!(model.out_of_order_count(), 0);
    assert_eq!(model.recipes[0].artifacts[0].in_channel, Some(true));
    assert_eq!(model.recipes[1].artifacts[0].in_channel, Some(false));

    let details = DetailsFormatter::new().format(&model).unwrap();
    assert!(details.contains("Num not in order = 0/2"));
    assert!(details.contains("Not in channel archive"));
}

#[tokio::test]
async fn test_progress_is_reported_per_recipe() {
    let source = MockRecipeSource::new()
        .with_recipe("a", &[], &["a.pkg"])
        .with_recipe("b", &[], &["b.pkg"]);
    let reporter = MockProgressReporter::new();
    let use_case = PlanBuildUseCase::new(source, MockChannelRepository::new(), reporter.clone());

    use_case.execute(request()).await.unwrap();

    let messages = reporter.get_messages();
    assert!(messages.contains(&"Progress: 1/2 - a".to_string()));
    assert!(messages.contains(&"Progress: 2/2 - b".to_string()));
    assert!(messages.contains(&"Completed: ✅ Loaded 2 recipe(s)".to_string()));
}

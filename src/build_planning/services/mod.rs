mod culler;
mod graph_builder;
mod plan_generator;
mod recipe_filter;
mod topological_sorter;

pub use culler::Culler;
pub use graph_builder::DependencyGraphBuilder;
pub use plan_generator::PlanGenerator;
pub use recipe_filter::RecipeFilter;
pub use topological_sorter::TopologicalSorter;

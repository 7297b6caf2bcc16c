/// Use cases module containing application business logic orchestration
mod plan_build;

pub use plan_build::PlanBuildUseCase;

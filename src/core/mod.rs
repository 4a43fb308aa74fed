mod factor;
mod factor_graph;
mod factor_graph_builder;
mod factor_node;
mod message;
mod variable;
mod variable_node;

pub use factor::Factor;
pub use factor_graph::{FGError, FGResult, FactorGraph, MessagePassingInfo};
pub use factor_graph_builder::{FGBuilderError, FGBuilderResult, FactorGraphBuilder};
pub use message::Message;
pub use variable::Variable;

use alloc::{string::String, sync::Arc};

use super::{Attributes, GraphStage, StageKind, StageShape, stage_factory::StageFactory};

/// Immutable description of one stage inside a graph.
#[derive(Clone)]
pub(crate) struct StageDescriptor {
  pub(crate) attributes: Attributes,
  pub(crate) kind:       StageKind,
  pub(crate) shape:      StageShape,
  pub(crate) buffering:  bool,
  pub(crate) factory:    Arc<dyn StageFactory>,
}

impl StageDescriptor {
  pub(crate) fn new<G>(stage: G) -> Self
  where
    G: GraphStage, {
    Self {
      attributes: Attributes::new(),
      kind:       stage.kind(),
      shape:      stage.shape(),
      buffering:  stage.is_buffering(),
      factory:    Arc::new(stage),
    }
  }

  pub(crate) fn name(&self) -> &str {
    self.attributes.name().unwrap_or(self.kind.default_name())
  }

  pub(crate) fn owned_name(&self) -> String {
    String::from(self.name())
  }
}

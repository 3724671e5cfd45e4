use super::StreamBufferConfig;

/// Configuration shared by the materializers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterializerConfig {
  buffer_config: StreamBufferConfig,
  drive_budget:  usize,
}

impl MaterializerConfig {
  /// Creates a new configuration with defaults.
  #[must_use]
  pub fn new() -> Self {
    Self { buffer_config: StreamBufferConfig::default(), drive_budget: 64 }
  }

  /// Returns the configured buffer settings.
  #[must_use]
  pub const fn buffer_config(&self) -> StreamBufferConfig {
    self.buffer_config
  }

  /// Returns how many signals a stage may process, or elements a source may emit, per activation.
  #[must_use]
  pub const fn drive_budget(&self) -> usize {
    self.drive_budget
  }

  /// Updates the buffer configuration.
  #[must_use]
  pub const fn with_buffer_config(mut self, buffer_config: StreamBufferConfig) -> Self {
    self.buffer_config = buffer_config;
    self
  }

  /// Updates the drive budget. Zero is raised to one.
  #[must_use]
  pub const fn with_drive_budget(mut self, drive_budget: usize) -> Self {
    self.drive_budget = if drive_budget == 0 { 1 } else { drive_budget };
    self
  }
}

impl Default for MaterializerConfig {
  fn default() -> Self {
    Self::new()
  }
}

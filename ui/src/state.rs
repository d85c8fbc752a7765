use userreg_business::{ApiConfig, register};
use userreg_states::{StateCtx, Time};

/// The main application state.
pub struct State {
    /// The state context for business logic.
    pub ctx: StateCtx,
}

impl Default for State {
    fn default() -> Self {
        Self::new(ApiConfig::default())
    }
}

impl State {
    pub fn new(config: ApiConfig) -> Self {
        let mut ctx = StateCtx::new();

        ctx.add_state(Time::default());
        register(&mut ctx, config);

        Self { ctx }
    }

    /// State whose API calls go to `base_url` (a mock server in tests).
    pub fn test(base_url: String) -> Self {
        Self::new(ApiConfig::new(base_url))
    }
}

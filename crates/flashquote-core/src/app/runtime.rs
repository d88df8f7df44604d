impl<QS, IN> ReaderApp<QS, IN>
where
    QS: QuoteSource,
    IN: InputProvider,
{
    pub fn new(source: QS, input: IN, mut config: ReaderConfig) -> Self {
        config.wpm = resolve_wpm(i64::from(config.wpm), None);

        Self {
            source,
            input,
            config,
            ui: UiState::Idle,
            words: Vec::new(),
            cursor: 0,
            shown: None,
            tick_period_ms: tick_period_ms(config.wpm),
            generation: 0,
            pending_redraw: true,
            settings_dirty: false,
        }
    }

    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        self.process_inputs();

        match self.ui {
            UiState::Fetching { token } => self.tick_fetching(token, now_ms),
            UiState::Reading { next_word_ms } => self.tick_reading(next_word_ms, now_ms),
            UiState::Idle | UiState::Errored => self.take_redraw(),
        }
    }

    pub fn wpm(&self) -> u16 {
        self.config.wpm
    }

    pub fn is_running(&self) -> bool {
        matches!(self.ui, UiState::Fetching { .. } | UiState::Reading { .. })
    }

    pub fn persisted_settings(&self) -> PersistedSettings {
        PersistedSettings::new(self.config.wpm)
    }

    pub fn apply_persisted_settings(&mut self, settings: &PersistedSettings) {
        self.config.wpm = resolve_wpm(i64::from(settings.wpm), Some(self.config.wpm));
        self.pending_redraw = true;
    }

    /// Whether a setting changed since the last call. Hosts persist on `true`.
    pub fn take_settings_dirty(&mut self) -> bool {
        core::mem::take(&mut self.settings_dirty)
    }

    pub fn with_source_mut<R>(&mut self, f: impl FnOnce(&mut QS) -> R) -> R {
        f(&mut self.source)
    }

    pub fn with_input_mut<R>(&mut self, f: impl FnOnce(&mut IN) -> R) -> R {
        f(&mut self.input)
    }

    fn tick_fetching(&mut self, token: RequestToken, now_ms: u64) -> TickResult {
        while let Some(result) = self.source.poll() {
            if result.token != token {
                debug!(
                    "fetch: dropping result for superseded request {:?}",
                    result.token
                );
                continue;
            }

            match result.outcome {
                Ok(quote) => {
                    self.words = split_words(&quote);
                    self.cursor = 0;
                    self.tick_period_ms = tick_period_ms(self.config.wpm);
                    self.ui = UiState::Reading {
                        next_word_ms: now_ms + self.tick_period_ms,
                    };
                    self.pending_redraw = false;
                    return TickResult::RenderRequested;
                }
                Err(error) => {
                    warn!("fetch: request {:?} failed: {:?}", token, error);
                    self.enter_errored();
                    return TickResult::RenderRequested;
                }
            }
        }

        self.take_redraw()
    }

    fn tick_reading(&mut self, next_word_ms: u64, now_ms: u64) -> TickResult {
        if now_ms < next_word_ms {
            return self.take_redraw();
        }

        let text = self.words.get(self.cursor).cloned().unwrap_or_default();
        self.shown = Some(ShownWord {
            index: self.cursor,
            text,
        });
        self.cursor += 1;

        if self.cursor >= self.words.len() {
            // The quote is exhausted. Chain straight into the next fetch
            // while the last word stays on screen.
            self.begin_fetch();
        } else {
            self.ui = UiState::Reading {
                next_word_ms: next_word_ms + self.tick_period_ms,
            };
        }

        self.pending_redraw = false;
        TickResult::RenderRequested
    }

    fn begin_fetch(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        let token = RequestToken(self.generation);
        debug!("fetch: issuing request {:?}", token);

        if self.source.request(token).is_err() {
            warn!("fetch: source rejected request {:?}", token);
            self.enter_errored();
            return;
        }

        self.ui = UiState::Fetching { token };
    }

    fn start_session(&mut self) {
        if self.is_running() {
            return;
        }

        self.begin_fetch();
        self.pending_redraw = true;
    }

    fn stop_session(&mut self) {
        if !self.is_running() {
            return;
        }

        if matches!(self.ui, UiState::Fetching { .. }) {
            self.source.cancel();
        }

        self.ui = UiState::Idle;
        self.words.clear();
        self.cursor = 0;
        self.shown = None;
        self.pending_redraw = true;
    }

    fn enter_errored(&mut self) {
        self.ui = UiState::Errored;
        self.words.clear();
        self.cursor = 0;
        self.shown = None;
        self.pending_redraw = false;
    }

    fn take_redraw(&mut self) -> TickResult {
        if self.pending_redraw {
            self.pending_redraw = false;
            TickResult::RenderRequested
        } else {
            TickResult::NoRender
        }
    }
}

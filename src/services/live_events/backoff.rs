/// Backoff exponencial para reconexiones: 1s, 2s, 4s... hasta el máximo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconnectBackoff {
    initial_ms: u32,
    max_ms: u32,
    current_ms: u32,
}

impl ReconnectBackoff {
    pub fn new(initial_ms: u32, max_ms: u32) -> Self {
        let initial_ms = initial_ms.max(1);
        let max_ms = max_ms.max(initial_ms);
        Self {
            initial_ms,
            max_ms,
            current_ms: initial_ms,
        }
    }

    /// Devuelve la espera actual y duplica la siguiente
    pub fn next_delay(&mut self) -> u32 {
        let delay = self.current_ms;
        self.current_ms = self.current_ms.saturating_mul(2).min(self.max_ms);
        delay
    }

    pub fn reset(&mut self) {
        self.current_ms = self.initial_ms;
    }

    pub fn peek(&self) -> u32 {
        self.current_ms
    }
}

impl Default for ReconnectBackoff {
    fn default() -> Self {
        let cfg = &crate::config::CONFIG.live_events;
        Self::new(cfg.reconnect_initial_ms, cfg.reconnect_max_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nth_delay_doubles_up_to_cap() {
        let mut backoff = ReconnectBackoff::new(1_000, 30_000);
        let delays: Vec<u32> = (0..8).map(|_| backoff.next_delay()).collect();
        assert_eq!(delays, vec![1_000, 2_000, 4_000, 8_000, 16_000, 30_000, 30_000, 30_000]);

        for n in 1..=8u32 {
            let expected = (1_000u64 * 2u64.pow(n - 1)).min(30_000) as u32;
            assert_eq!(delays[(n - 1) as usize], expected);
        }
    }

    #[test]
    fn reset_returns_to_initial() {
        let mut backoff = ReconnectBackoff::new(1_000, 30_000);
        backoff.next_delay();
        backoff.next_delay();
        assert_eq!(backoff.peek(), 4_000);
        backoff.reset();
        assert_eq!(backoff.next_delay(), 1_000);
    }

    #[test]
    fn never_overflows() {
        let mut backoff = ReconnectBackoff::new(u32::MAX / 2 + 1, u32::MAX);
        backoff.next_delay();
        assert_eq!(backoff.next_delay(), u32::MAX);
        assert_eq!(backoff.next_delay(), u32::MAX);
    }
}

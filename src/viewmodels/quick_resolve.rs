use crate::models::{ResolutionReason, ResolutionType, TicketUpdate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveStep {
    #[default]
    Type,
    Reason(ResolutionType),
}

/// Hoja de resolución rápida en dos pasos: tipo → (motivo) → envío
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuickResolve {
    pub step: ResolveStep,
}

impl QuickResolve {
    /// Tipos sin motivo devuelven el update directamente
    pub fn select_type(&mut self, resolution_type: ResolutionType) -> Option<TicketUpdate> {
        if resolution_type.needs_reason() {
            self.step = ResolveStep::Reason(resolution_type);
            None
        } else {
            Some(TicketUpdate::resolve(resolution_type, None))
        }
    }

    pub fn select_reason(&self, reason: ResolutionReason) -> Option<TicketUpdate> {
        match self.step {
            ResolveStep::Reason(resolution_type) => Some(TicketUpdate::resolve(resolution_type, Some(reason))),
            ResolveStep::Type => None,
        }
    }

    pub fn back(&mut self) {
        self.step = ResolveStep::Type;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TicketStatus;

    #[test]
    fn plain_types_submit_immediately() {
        let mut sheet = QuickResolve::default();
        let update = sheet.select_type(ResolutionType::NoAction).unwrap();
        assert_eq!(update.status, Some(TicketStatus::Resolved));
        assert_eq!(sheet.step, ResolveStep::Type);
    }

    #[test]
    fn reship_requires_reason() {
        let mut sheet = QuickResolve::default();
        assert!(sheet.select_type(ResolutionType::Reship).is_none());
        assert_eq!(sheet.step, ResolveStep::Reason(ResolutionType::Reship));

        let body = serde_json::to_value(sheet.select_reason(ResolutionReason::Doa).unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"status": "resolved", "resolutionType": "reship", "resolutionReason": "doa"})
        );

        sheet.back();
        assert!(sheet.select_reason(ResolutionReason::Doa).is_none());
    }
}

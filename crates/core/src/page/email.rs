use folio_protocol::HostCommand;

/// Show/hide toggle for the contact address. The address is stored in two
/// parts so it never appears whole in the page markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailToggle {
    user: String,
    domain: String,
    masked_label: String,
    revealed: bool,
}

impl EmailToggle {
    pub fn new(
        user: impl Into<String>,
        domain: impl Into<String>,
        masked_label: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            domain: domain.into(),
            masked_label: masked_label.into(),
            revealed: false,
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn address(&self) -> String {
        format!("{}@{}", self.user, self.domain)
    }

    pub fn toggle(&mut self) -> HostCommand {
        self.revealed = !self.revealed;
        let text = if self.revealed {
            self.address()
        } else {
            self.masked_label.clone()
        };
        HostCommand::SetEmailText {
            text,
            revealed: self.revealed,
        }
    }
}

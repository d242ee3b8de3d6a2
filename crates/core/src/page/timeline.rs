use folio_protocol::HostCommand;

/// Click on a timeline node: jump to its section, if it names one.
pub fn node_clicked(target: Option<&str>) -> Option<HostCommand> {
    match target {
        Some(id) if !id.is_empty() => Some(HostCommand::ScrollToSection { id: id.to_string() }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nodes_with_target_scroll() {
        assert_eq!(
            node_clicked(Some("2021")),
            Some(HostCommand::ScrollToSection { id: "2021".into() })
        );
        assert_eq!(node_clicked(Some("")), None);
        assert_eq!(node_clicked(None), None);
    }
}

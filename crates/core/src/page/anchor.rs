use folio_protocol::HostCommand;

/// Section id referenced by an in-page href such as `#about`.
///
/// Empty hrefs, a bare `#` and links to other documents yield `None`.
pub fn section_id(href: &str) -> Option<&str> {
    let id = href.trim().strip_prefix('#')?;
    if id.is_empty() { None } else { Some(id) }
}

/// Click on an in-page link. Returns `None` when the link should keep its
/// default behaviour; otherwise the host prevents the default jump and
/// applies the command.
pub fn follow(href: &str) -> Option<HostCommand> {
    section_id(href).map(|id| HostCommand::ScrollToSection { id: id.to_string() })
}

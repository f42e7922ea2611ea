//! XML report output and parsing.

use crate::error::AuditError;
use crate::log::AuditLog;
use laurel_core::ProfileId;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::fs;
use std::path::Path;

const ROOT: &str = "data";
const PROFILE: &str = "profile";
const LINK: &str = "link";
const ACHIEVEMENT: &str = "achievement";

impl AuditLog {
    /// Serialize the log into a UTF-8 XML document.
    pub fn serialize(&self) -> Result<String, AuditError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(AuditError::xml)?;

        let mut root = BytesStart::new(ROOT);
        if let Some(run_id) = self.run_id() {
            root.push_attribute(("run", run_id));
        }
        writer
            .write_event(Event::Start(root))
            .map_err(AuditError::xml)?;

        for profile in self.profiles() {
            let mut element = BytesStart::new(PROFILE);
            element.push_attribute(("id", profile.profile_id.as_str()));
            writer
                .write_event(Event::Start(element))
                .map_err(AuditError::xml)?;

            write_text_element(&mut writer, LINK, &self.link_for(&profile.profile_id))?;
            for entry in &profile.entries {
                write_text_element(&mut writer, ACHIEVEMENT, &entry.message)?;
            }

            writer
                .write_event(Event::End(BytesEnd::new(PROFILE)))
                .map_err(AuditError::xml)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new(ROOT)))
            .map_err(AuditError::xml)?;

        let mut bytes = writer.into_inner();
        bytes.push(b'\n');
        String::from_utf8(bytes).map_err(AuditError::xml)
    }

    /// Serialize the log and write it to `path` in one step.
    pub fn write_report(&self, path: impl AsRef<Path>) -> Result<(), AuditError> {
        let path = path.as_ref();
        let document = self.serialize()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, document)?;
        tracing::info!(
            path = %path.display(),
            profiles = self.profile_count(),
            entries = self.len(),
            "Audit report written"
        );
        Ok(())
    }
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    text: &str,
) -> Result<(), AuditError> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(AuditError::xml)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(AuditError::xml)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(AuditError::xml)?;
    Ok(())
}

/// A report read back from its XML form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedReport {
    pub run_id: Option<String>,
    pub profiles: Vec<ProfileReport>,
}

impl ParsedReport {
    /// Total number of messages across all profiles.
    pub fn message_count(&self) -> usize {
        self.profiles.iter().map(|p| p.messages.len()).sum()
    }
}

/// One `<profile>` block of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileReport {
    pub profile_id: ProfileId,
    pub link: String,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Link,
    Message,
}

/// Parse a document produced by [`AuditLog::serialize`].
///
/// Text inside `<link>` and `<achievement>` is kept exactly as written.
/// Whitespace between elements is ignored.
pub fn parse_report(xml: &str) -> Result<ParsedReport, AuditError> {
    let mut reader = Reader::from_str(xml);

    let mut report = ParsedReport::default();
    let mut seen_root = false;
    let mut current: Option<ProfileReport> = None;
    let mut field: Option<Field> = None;
    let mut text = String::new();

    loop {
        match reader.read_event().map_err(AuditError::xml)? {
            Event::Start(e) => match e.name().as_ref() {
                b"data" => {
                    seen_root = true;
                    report.run_id = attribute(&e, "run")?;
                }
                b"profile" => {
                    let id = attribute(&e, "id")?.ok_or_else(|| {
                        AuditError::MalformedReport("<profile> without an id attribute".to_string())
                    })?;
                    current = Some(ProfileReport {
                        profile_id: ProfileId::new(id),
                        link: String::new(),
                        messages: Vec::new(),
                    });
                }
                b"link" => {
                    field = Some(Field::Link);
                    text.clear();
                }
                b"achievement" => {
                    field = Some(Field::Message);
                    text.clear();
                }
                other => {
                    return Err(AuditError::MalformedReport(format!(
                        "unexpected element <{}>",
                        String::from_utf8_lossy(other)
                    )));
                }
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"data" => {
                    seen_root = true;
                    report.run_id = attribute(&e, "run")?;
                }
                b"link" | b"achievement" => {
                    let profile = current.as_mut().ok_or_else(|| {
                        AuditError::MalformedReport(
                            "<link>/<achievement> outside of <profile>".to_string(),
                        )
                    })?;
                    if e.name().as_ref() == b"link" {
                        profile.link.clear();
                    } else {
                        profile.messages.push(String::new());
                    }
                }
                _ => {}
            },
            Event::Text(t) => {
                if field.is_some() {
                    text.push_str(&t.unescape().map_err(AuditError::xml)?);
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"link" | b"achievement" => {
                    let profile = current.as_mut().ok_or_else(|| {
                        AuditError::MalformedReport(
                            "<link>/<achievement> outside of <profile>".to_string(),
                        )
                    })?;
                    match field.take() {
                        Some(Field::Link) => profile.link = std::mem::take(&mut text),
                        Some(Field::Message) => profile.messages.push(std::mem::take(&mut text)),
                        None => {}
                    }
                }
                b"profile" => {
                    if let Some(profile) = current.take() {
                        report.profiles.push(profile);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(AuditError::MalformedReport(
            "missing <data> root element".to_string(),
        ));
    }

    Ok(report)
}

fn attribute(element: &BytesStart<'_>, name: &str) -> Result<Option<String>, AuditError> {
    match element.try_get_attribute(name).map_err(AuditError::xml)? {
        Some(attr) => Ok(Some(
            attr.unescape_value().map_err(AuditError::xml)?.into_owned(),
        )),
        None => Ok(None),
    }
}

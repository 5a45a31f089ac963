//! Curriculum vitae layout.
//!
//! [`render_cv`] walks a hydrated profile and emits text blocks in a fixed
//! order into a [`DocumentSink`]. The sink decides what a block looks like:
//! [`crate::pdf::document::PdfDocument`] draws it on a PDF page, while
//! [`PlainTextDocument`] produces a plain-text transcript.

use chrono::NaiveDate;

use crate::{
    entities::{education::Education, experience::Experience, profile::SeekerProfile},
    errors::AppError,
};

pub const TITLE_SIZE: f32 = 20.0;
pub const NAME_SIZE: f32 = 16.0;
pub const SECTION_SIZE: f32 = 18.0;
pub const SUBHEADING_SIZE: f32 = 16.0;
pub const BODY_SIZE: f32 = 14.0;

const DATE_FORMAT: &str = "%a %b %d %Y";
const PRESENT: &str = "Present";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Single-pass document writer. Construction opens the document,
/// `finish` consumes the sink and yields the finished output.
pub trait DocumentSink {
    type Output;

    fn text(&mut self, size: f32, align: Align, content: &str);

    /// Advances the cursor by `lines` lines of the current font size.
    fn move_down(&mut self, lines: f32);

    fn finish(self) -> Result<Self::Output, AppError>;
}

pub fn render_cv<S: DocumentSink>(seeker: &SeekerProfile, mut sink: S) -> Result<S::Output, AppError> {
    sink.text(TITLE_SIZE, Align::Center, "Curriculum Vitae");
    sink.text(NAME_SIZE, Align::Center, &seeker.profile.full_name());
    sink.move_down(1.0);

    sink.text(SECTION_SIZE, Align::Left, "Experiences");
    for experience in &seeker.experiences {
        write_experience(&mut sink, experience);
    }

    sink.move_down(1.0);
    sink.text(SECTION_SIZE, Align::Left, "Education");
    for education in &seeker.educations {
        write_education(&mut sink, education);
    }

    sink.finish()
}

fn write_experience<S: DocumentSink>(sink: &mut S, experience: &Experience) {
    sink.move_down(0.5);
    sink.text(
        SUBHEADING_SIZE,
        Align::Left,
        &format!("{} at {}", experience.title, experience.employer),
    );
    sink.text(BODY_SIZE, Align::Left, &format!("Location: {}", experience.country));
    sink.text(
        BODY_SIZE,
        Align::Left,
        &duration_line(experience.start_date, experience.effective_end_date(), experience.is_current_role),
    );
    sink.text(
        BODY_SIZE,
        Align::Left,
        &format!("Responsibilities: {}", experience.responsibilities),
    );
    sink.move_down(0.5);
}

fn write_education<S: DocumentSink>(sink: &mut S, education: &Education) {
    sink.move_down(0.5);
    sink.text(
        SUBHEADING_SIZE,
        Align::Left,
        &format!("{} in {}", education.degree, education.field_of_study),
    );
    sink.text(BODY_SIZE, Align::Left, &format!("Institution: {}", education.institution));
    sink.text(
        BODY_SIZE,
        Align::Left,
        &duration_line(education.start_date, education.effective_end_date(), education.is_studying),
    );
    sink.move_down(0.5);
}

/// `Duration: Mon Jan 15 2024 - Present`. A finished period without a stored
/// end date (rows written before validation existed) renders as "Unspecified".
pub fn duration_line(start: NaiveDate, end: Option<NaiveDate>, ongoing: bool) -> String {
    let end = match (ongoing, end) {
        (true, _) => PRESENT.to_string(),
        (false, Some(end)) => format_date(end),
        (false, None) => "Unspecified".to_string(),
    };
    format!("Duration: {} - {}", format_date(start), end)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

const TEXT_WIDTH: usize = 72;

/// Plain-text rendition of the document, one block per line.
#[derive(Debug, Default)]
pub struct PlainTextDocument {
    lines: Vec<String>,
    pending_space: f32,
}

impl PlainTextDocument {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentSink for PlainTextDocument {
    type Output = String;

    fn text(&mut self, _size: f32, align: Align, content: &str) {
        if !self.lines.is_empty() {
            for _ in 0..self.pending_space.floor() as usize {
                self.lines.push(String::new());
            }
        }
        self.pending_space = 0.0;

        let line = match align {
            Align::Left => content.to_string(),
            Align::Center => {
                let width = content.chars().count();
                let pad = TEXT_WIDTH.saturating_sub(width) / 2;
                format!("{}{}", " ".repeat(pad), content)
            }
        };
        self.lines.push(line);
    }

    fn move_down(&mut self, lines: f32) {
        self.pending_space += lines.max(0.0);
    }

    fn finish(self) -> Result<String, AppError> {
        let mut output = self.lines.join("\n");
        output.push('\n');
        Ok(output)
    }
}

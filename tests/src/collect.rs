use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

use ecow::{EcoString, eco_format};
use quire_layout::config::{FloatSide, LineConfig, Props};
use quire_layout::geom::{Abs, Rect};
use quire_layout::inline::{Line, LineRegion};
use quire_layout::item::{
    ContentItem, FloatBox, InlineBlock, LayoutStatus, Leaf, TabItem, TextRun, TextStyle,
};
use serde::Deserialize;

use crate::ARGS;

/// Collects all tests from the suite.
///
/// Returns the selected tests and the number of skipped ones, or the errors
/// of files that failed to parse.
pub fn collect() -> Result<(Vec<Test>, usize), Vec<TestParseError>> {
    Collector::new().collect()
}

/// A single test: a line, where to lay it out, and what to expect.
#[derive(Debug, Clone)]
pub struct Test {
    pub name: EcoString,
    pub path: PathBuf,
    pub case: TestCase,
}

impl Display for Test {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.path.display())
    }
}

/// An error in a suite file.
#[derive(Debug)]
pub struct TestParseError {
    pub path: PathBuf,
    pub message: EcoString,
}

impl Display for TestParseError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.path.display())
    }
}

/// The contents of a suite file.
#[derive(Debug, Deserialize)]
struct SuiteFile {
    #[serde(rename = "test")]
    tests: Vec<TestCase>,
}

/// A test as written in a suite file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TestCase {
    pub name: EcoString,
    /// The width of the area the line is laid out in.
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default)]
    pub indent: f64,
    #[serde(default)]
    pub first_on_root_area: bool,
    #[serde(default)]
    pub config: LineConfig,
    pub children: Vec<TestChild>,
    #[serde(default)]
    pub expect: Expect,
}

fn default_height() -> f64 {
    100.0
}

/// A child of a test line.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TestChild {
    Text {
        text: EcoString,
        #[serde(default = "default_font_size")]
        size: f64,
        #[serde(default)]
        props: Props,
    },
    Tab,
    Leaf {
        width: f64,
        height: f64,
        #[serde(default)]
        props: Props,
    },
    Block {
        min: f64,
        max: f64,
        rows: Vec<f64>,
        #[serde(default)]
        props: Props,
    },
    Float {
        side: FloatSide,
        width: f64,
        height: f64,
        #[serde(default)]
        splittable: bool,
    },
}

fn default_font_size() -> f64 {
    10.0
}

/// What a test expects of the laid out line. Unset fields are not checked.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Expect {
    pub status: Option<ExpectedStatus>,
    /// The glyphs of the line's text children, in visual order.
    pub texts: Option<Vec<String>>,
    /// The width of the line's occupied area.
    pub width: Option<f64>,
    /// The left edges of the line's non-floating children.
    pub xs: Option<Vec<f64>>,
    /// The number of children continuing on the next line.
    pub overflow: Option<usize>,
    pub cause: Option<usize>,
    pub newline: Option<bool>,
    pub warnings: Option<usize>,
    pub floats_to_next_page: Option<usize>,
    pub min_width: Option<f64>,
    pub max_width: Option<f64>,
}

/// A layout status as written in a suite file.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpectedStatus {
    Full,
    Partial,
    Nothing,
}

impl From<ExpectedStatus> for LayoutStatus {
    fn from(status: ExpectedStatus) -> Self {
        match status {
            ExpectedStatus::Full => Self::Full,
            ExpectedStatus::Partial => Self::Partial,
            ExpectedStatus::Nothing => Self::Nothing,
        }
    }
}

impl TestCase {
    /// Build the line the test lays out.
    pub fn line(&self) -> Line {
        let children = self.children.iter().map(TestChild::build).collect();
        Line::new(children, self.config.clone())
    }

    /// The region the test lays its line out in.
    pub fn region(&self) -> LineRegion {
        let area = Rect::new(Abs::zero(), Abs::zero(), Abs::pt(self.width), Abs::pt(self.height));
        LineRegion {
            first_on_root_area: self.first_on_root_area,
            ..LineRegion::new(area).with_indent(Abs::pt(self.indent))
        }
    }
}

impl TestChild {
    fn build(&self) -> ContentItem {
        match self {
            Self::Text { text, size, props } => {
                let style = TextStyle { font_size: Abs::pt(*size), ..TextStyle::default() };
                TextRun::new(text.clone(), style).with_props(props.clone()).into()
            }
            Self::Tab => TabItem::new().into(),
            Self::Leaf { width, height, props } => {
                Leaf::new(Abs::pt(*width), Abs::pt(*height)).with_props(props.clone()).into()
            }
            Self::Block { min, max, rows, props } => {
                let rows = rows.iter().copied().map(Abs::pt).collect();
                InlineBlock::new(Abs::pt(*min), Abs::pt(*max), rows)
                    .with_props(props.clone())
                    .into()
            }
            Self::Float { side, width, height, splittable } => {
                let float = FloatBox::new(*side, Abs::pt(*width), Abs::pt(*height));
                let float = if *splittable { float.splittable() } else { float };
                float.into()
            }
        }
    }
}

/// Collects all tests from all files.
struct Collector {
    tests: Vec<Test>,
    errors: Vec<TestParseError>,
    seen: HashMap<EcoString, PathBuf>,
    skipped: usize,
}

impl Collector {
    fn new() -> Self {
        Self { tests: vec![], errors: vec![], seen: HashMap::new(), skipped: 0 }
    }

    fn collect(mut self) -> Result<(Vec<Test>, usize), Vec<TestParseError>> {
        for entry in walkdir::WalkDir::new(&ARGS.suite).sort_by_file_name() {
            let entry = entry.unwrap();
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "toml") {
                self.parse_file(path);
            }
        }

        if self.errors.is_empty() {
            Ok((self.tests, self.skipped))
        } else {
            Err(self.errors)
        }
    }

    fn parse_file(&mut self, path: &Path) {
        let text = std::fs::read_to_string(path).unwrap();
        let file: SuiteFile = match toml::from_str(&text) {
            Ok(file) => file,
            Err(err) => {
                let message = eco_format!("failed to parse suite file: {}", err.message());
                self.errors.push(TestParseError { path: path.into(), message });
                return;
            }
        };

        for case in file.tests {
            let name = case.name.clone();
            if let Some(first) = self.seen.insert(name.clone(), path.into()) {
                let message =
                    eco_format!("duplicate test {name}, first defined in {}", first.display());
                self.errors.push(TestParseError { path: path.into(), message });
                continue;
            }

            if !selected(&name) {
                self.skipped += 1;
                continue;
            }

            self.tests.push(Test { name, path: path.into(), case });
        }
    }
}

/// Whether the test was selected on the command line.
fn selected(name: &str) -> bool {
    ARGS.pattern.is_empty()
        || ARGS.pattern.iter().any(|pattern| {
            if ARGS.exact {
                name == pattern.as_str()
            } else {
                pattern.is_match(name)
            }
        })
}

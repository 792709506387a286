//! Test file builders.
//!
//! `FileText` lays out the sections of a hand-written IGES file record by
//! record. `create_all_entities_file()` produces an in-memory file holding
//! one instance of every supported entity type.

#![allow(dead_code)]

use super::{directory_fields, parameter_content, record};
use chrono::NaiveDate;
use igesrust::entities::*;
use igesrust::types::{Color, ColorNumber, Level, LineFont, Vector3};
use igesrust::{GlobalSection, IgesFile, TransformationMatrix};
use std::f64::consts::PI;

/// Records of a hand-written file, section by section.
#[derive(Debug, Default)]
pub struct FileText {
    start: Vec<String>,
    global: Vec<String>,
    directory: Vec<String>,
    parameter: Vec<String>,
}

impl FileText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(mut self, content: &str) -> Self {
        self.start.push(content.to_string());
        self
    }

    pub fn global(mut self, content: &str) -> Self {
        self.global.push(content.to_string());
        self
    }

    /// Add a directory entry from its two rows of nine fields.
    pub fn entry(mut self, first: [&str; 9], second: [&str; 9]) -> Self {
        self.directory.push(directory_fields(first));
        self.directory.push(directory_fields(second));
        self
    }

    /// Add a parameter record; `owner` fills the pointer-back column.
    pub fn parameter(mut self, data: &str, owner: Option<usize>) -> Self {
        self.parameter.push(parameter_content(data, owner));
        self
    }

    fn sections(&self) -> [(char, &Vec<String>); 4] {
        [
            ('S', &self.start),
            ('G', &self.global),
            ('D', &self.directory),
            ('P', &self.parameter),
        ]
    }

    /// Render without a Terminate record.
    pub fn build(&self) -> String {
        let mut text = String::new();
        for (tag, lines) in self.sections() {
            for (i, content) in lines.iter().enumerate() {
                text.push_str(&record(content, tag, i + 1));
            }
        }
        text
    }

    /// Render with a matching Terminate record.
    pub fn build_with_terminate(&self) -> String {
        let mut text = self.build();
        let terminate = format!(
            "S{:>7}G{:>7}D{:>7}P{:>7}",
            self.start.len(),
            self.global.len(),
            self.directory.len(),
            self.parameter.len()
        );
        text.push_str(&record(&terminate, 'T', 1));
        text
    }
}

/// Global section fixed at a known time.
pub fn fixed_global() -> GlobalSection {
    let time = NaiveDate::from_ymd_opt(2000, 12, 25)
        .and_then(|d| d.and_hms_opt(13, 8, 5))
        .expect("valid date");
    GlobalSection::with_time(time)
}

/// An empty file with a fixed time stamp.
pub fn empty_file() -> IgesFile {
    let mut file = IgesFile::new();
    file.global = fixed_global();
    file
}

/// Create a file containing every supported entity type, with shared
/// sub-entities and every kind of pointer field in use.
pub fn create_all_entities_file() -> IgesFile {
    let mut file = empty_file();
    file.start_lines = vec!["Every supported entity".to_string()];

    let matrix = file.insert_entity(TransformationMatrixEntity::from_matrix(
        TransformationMatrix::from_translation(Vector3::new(10.0, 20.0, 30.0)),
    ));
    let mut leaf = ColorDefinition::from_rgb(0.0, 100.0, 0.0);
    leaf.name = "leaf".to_string();
    let green = file.insert_entity(leaf);
    let font_line = file.insert_entity(Null::new());
    let levels = file.insert_entity(Null::new());

    let mut line = Line::from_points(Vector3::new(1.0, 2.0, 3.0), Vector3::new(4.0, 5.0, 6.0));
    line.common.transformation = Some(matrix);
    line.common.color = Color::Custom(green);
    line.common.line_font = LineFont::Custom(font_line);
    line.common.level = Level::Multiple(levels);
    line.common.label = "EDGE".to_string();
    line.common.subscript = 7;
    let line = file.insert_entity(line);

    let mut arc = CircularArc::circle(Vector3::new(5.0, 5.0, 2.0), 3.0);
    arc.common.transformation = Some(matrix);
    arc.common.color = Color::Number(ColorNumber::Green);
    file.add_entity(arc);

    let mut ray = Line::from_points(Vector3::ZERO, Vector3::UNIT_X);
    ray.bounding = LineBounding::Ray;
    let ray = file.insert_entity(ray);

    let mut figure = SubfigureDefinition::with_name("this,is;the subfigure");
    figure.entities = vec![line, ray];
    file.add_entity(figure);

    let marker = file.insert_entity(SubfigureDefinition::with_name("marker"));
    let mut location = Location::new();
    location.point = Vector3::new(1.5, -2.5, 0.0);
    location.display_symbol = Some(marker);
    file.add_entity(location);

    file.add_entity(Direction::from_vector(Vector3::new(0.0, 0.0, 1.0)));
    file.add_entity(Sphere::from_center_radius(Vector3::ZERO, 2.5));
    file.add_entity(Torus::from_radii(5.0, 1.0));

    let mut base_font = TextFontDefinition::new();
    base_font.font_code = 1001;
    base_font.name = "BASE".to_string();
    base_font.scale = 8;
    let base_font = file.insert_entity(base_font);

    let mut font = TextFontDefinition::new();
    font.font_code = 2001;
    font.name = "STROKE".to_string();
    font.supersedes_font = Some(base_font);
    font.scale = 8;
    font.characters.push(FontCharacter {
        ascii_code: 65,
        origin: GridPoint::new(11, 0),
        movements: vec![
            PenMovement { pen_up: true, location: GridPoint::new(4, 8) },
            PenMovement { pen_up: false, location: GridPoint::new(8, 0) },
        ],
    });
    let font = file.insert_entity(font);

    let mut template = TextDisplayTemplate::new();
    template.box_width = 2.0;
    template.box_height = 1.0;
    template.font = Some(font);
    template.rotation_angle = PI / 4.0;
    template.mirror_axis = TextMirrorAxis::TextBaseLine;
    template.incremental = true;
    file.add_entity(template);

    let mut labels = LabelDisplayAssociativity::new();
    labels.placements.push(LabelPlacement {
        view: None,
        location: Vector3::new(1.0, 1.0, 0.0),
        leader: None,
        level: 3,
        label: Some(line),
    });
    let labels = file.insert_entity(labels);
    let mut labelled = Line::from_points(Vector3::ZERO, Vector3::new(0.0, 9.0, 0.0));
    labelled.common.label_display = Some(labels);
    labelled.common.properties = vec![green];
    file.add_entity(labelled);

    file.add_entity(Null::new());
    file
}

//! IGES entity types and traits
//!
//! Every entity owns an [`EntityCommon`] mirroring its directory entry plus
//! its own parameter data. Cross-entity relationships are [`EntityId`]s into
//! the owning file's arena.

use crate::error::Result;
use crate::io::iges::{Linker, ParameterReader, ParameterWriter};
use crate::types::{Color, EntityId, EntityStatus, Level, LineFont};

pub mod circular_arc;
pub mod color_definition;
pub mod direction;
pub mod label_display_associativity;
pub mod line;
pub mod location;
pub mod null;
pub mod sphere;
pub mod subfigure_definition;
pub mod text_display_template;
pub mod text_font_definition;
pub mod torus;
pub mod transformation_matrix;
pub mod unsupported;

pub use circular_arc::CircularArc;
pub use color_definition::ColorDefinition;
pub use direction::Direction;
pub use label_display_associativity::{LabelDisplayAssociativity, LabelPlacement};
pub use line::{Line, LineBounding};
pub use location::Location;
pub use null::Null;
pub use sphere::Sphere;
pub use subfigure_definition::SubfigureDefinition;
pub use text_display_template::{TextDisplayTemplate, TextMirrorAxis, TextRotation};
pub use text_font_definition::{FontCharacter, GridPoint, PenMovement, TextFontDefinition};
pub use torus::Torus;
pub use transformation_matrix::TransformationMatrixEntity;
pub use unsupported::{DirectoryCodes, Unsupported};

/// Base trait for all IGES entities
pub trait Entity {
    /// Directory attributes shared by every entity
    fn common(&self) -> &EntityCommon;

    fn common_mut(&mut self) -> &mut EntityCommon;

    /// IGES entity type number (directory field 1)
    fn entity_type_number(&self) -> i64;

    /// IGES form number (directory field 15)
    fn form_number(&self) -> i64 {
        0
    }

    /// Get the entity type name
    fn entity_type(&self) -> &'static str;

    /// Consume the type-specific parameters, in order. The leading type
    /// number has already been read.
    fn read_parameters(&mut self, reader: &mut ParameterReader<'_>) -> Result<()>;

    /// Push the type-specific parameters, in order, after the type number
    fn write_parameters(&self, writer: &mut ParameterWriter);

    /// Type-specific references to other entities, in parameter order
    fn references(&self, _refs: &mut Vec<EntityId>) {}

    /// Validate type-specific references against the completed arena
    fn link(&mut self, _linker: &mut Linker<'_>) {}

    /// Get the entity's color
    fn color(&self) -> Color {
        self.common().color
    }

    /// Set the entity's color
    fn set_color(&mut self, color: Color) {
        self.common_mut().color = color;
    }

    /// Get the transformation matrix entity applied to this entity
    fn transformation(&self) -> Option<EntityId> {
        self.common().transformation
    }

    /// Set the transformation matrix entity
    fn set_transformation(&mut self, matrix: Option<EntityId>) {
        self.common_mut().transformation = matrix;
    }
}

/// Directory attributes shared by all entities
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCommon {
    /// Defining structure entity (negated pointer on disk)
    pub structure: Option<EntityId>,
    pub line_font: LineFont,
    pub level: Level,
    pub view: Option<EntityId>,
    /// Transformation matrix entity (type 124)
    pub transformation: Option<EntityId>,
    /// Label display associativity entity (type 402)
    pub label_display: Option<EntityId>,
    pub status: EntityStatus,
    /// Line weight number
    pub line_weight: i64,
    pub color: Color,
    /// Entity label, at most 8 characters
    pub label: String,
    pub subscript: i64,
    /// Associativity entities listed after the parameter data
    pub associated_entities: Vec<EntityId>,
    /// Property entities listed after the parameter data
    pub properties: Vec<EntityId>,
}

impl EntityCommon {
    /// Create new common entity data with defaults
    pub fn new() -> Self {
        EntityCommon {
            structure: None,
            line_font: LineFont::default(),
            level: Level::default(),
            view: None,
            transformation: None,
            label_display: None,
            status: EntityStatus::default(),
            line_weight: 0,
            color: Color::DEFAULT,
            label: String::new(),
            subscript: 0,
            associated_entities: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Create with a specific status
    pub fn with_status(status: EntityStatus) -> Self {
        EntityCommon {
            status,
            ..Self::new()
        }
    }

    /// Directory-level references, in discovery order
    pub fn references(&self, refs: &mut Vec<EntityId>) {
        refs.extend(self.transformation);
        refs.extend(self.structure);
        if let LineFont::Custom(id) = self.line_font {
            refs.push(id);
        }
        if let Level::Multiple(id) = self.level {
            refs.push(id);
        }
        refs.extend(self.view);
        refs.extend(self.label_display);
        refs.extend(self.color.definition());
        refs.extend(self.associated_entities.iter().copied());
        refs.extend(self.properties.iter().copied());
    }

    /// Validate directory-level references against the completed arena
    pub fn link(&mut self, linker: &mut Linker<'_>) {
        self.transformation = linker.typed(self.transformation, 124, "transformation matrix");
        self.structure = linker.any(self.structure, "structure");
        if let LineFont::Custom(id) = self.line_font {
            if linker.any(Some(id), "line font").is_none() {
                self.line_font = LineFont::default();
            }
        }
        if let Level::Multiple(id) = self.level {
            if linker.any(Some(id), "level list").is_none() {
                self.level = Level::default();
            }
        }
        self.view = linker.any(self.view, "view");
        self.label_display = linker.typed(self.label_display, 402, "label display");
        if let Color::Custom(id) = self.color {
            if linker.typed(Some(id), 314, "color definition").is_none() {
                self.color = Color::DEFAULT;
            }
        }
        linker.retain(&mut self.associated_entities, "associated entity");
        linker.retain(&mut self.properties, "property");
    }
}

impl Default for EntityCommon {
    fn default() -> Self {
        Self::new()
    }
}

/// Enumeration of all entity types for type-safe storage
#[derive(Debug, Clone, PartialEq)]
pub enum EntityType {
    /// Null entity (type 0)
    Null(Null),
    /// Circular arc (type 100)
    CircularArc(CircularArc),
    /// Line (type 110)
    Line(Line),
    /// Location, a point (type 116)
    Location(Location),
    /// Direction (type 123)
    Direction(Direction),
    /// Transformation matrix (type 124)
    TransformationMatrix(TransformationMatrixEntity),
    /// Sphere (type 158)
    Sphere(Sphere),
    /// Torus (type 160)
    Torus(Torus),
    /// Subfigure definition (type 308)
    SubfigureDefinition(SubfigureDefinition),
    /// Text font definition (type 310)
    TextFontDefinition(TextFontDefinition),
    /// Text display template (type 312)
    TextDisplayTemplate(TextDisplayTemplate),
    /// Color definition (type 314)
    ColorDefinition(ColorDefinition),
    /// Label display associativity (type 402, form 5)
    LabelDisplayAssociativity(LabelDisplayAssociativity),
    /// Any other type/form combination, kept verbatim
    Unsupported(Unsupported),
}

impl EntityType {
    /// Instantiate the entity registered for a type/form combination.
    ///
    /// Types defining a single form ignore `form`; multi-form types only
    /// accept their defined forms. Everything else is [`Unsupported`].
    pub fn create(type_number: i64, form: i64) -> EntityType {
        match (type_number, form) {
            (0, _) => EntityType::Null(Null::new()),
            (100, _) => EntityType::CircularArc(CircularArc::new()),
            (110, _) => match LineBounding::from_form(form) {
                Some(bounding) => EntityType::Line(Line {
                    bounding,
                    ..Line::new()
                }),
                None => EntityType::Unsupported(Unsupported::new(type_number, form)),
            },
            (116, _) => EntityType::Location(Location::new()),
            (123, _) => EntityType::Direction(Direction::new()),
            (124, 0 | 1 | 10 | 11 | 12) => {
                EntityType::TransformationMatrix(TransformationMatrixEntity::with_form(form))
            }
            (158, _) => EntityType::Sphere(Sphere::new()),
            (160, _) => EntityType::Torus(Torus::new()),
            (308, _) => EntityType::SubfigureDefinition(SubfigureDefinition::new()),
            (310, _) => EntityType::TextFontDefinition(TextFontDefinition::new()),
            (312, 0 | 1) => EntityType::TextDisplayTemplate(TextDisplayTemplate {
                incremental: form == 1,
                ..TextDisplayTemplate::new()
            }),
            (314, _) => EntityType::ColorDefinition(ColorDefinition::new()),
            (402, 5) => EntityType::LabelDisplayAssociativity(LabelDisplayAssociativity::new()),
            _ => EntityType::Unsupported(Unsupported::new(type_number, form)),
        }
    }

    /// Get a reference to the entity trait object
    pub fn as_entity(&self) -> &dyn Entity {
        match self {
            EntityType::Null(e) => e,
            EntityType::CircularArc(e) => e,
            EntityType::Line(e) => e,
            EntityType::Location(e) => e,
            EntityType::Direction(e) => e,
            EntityType::TransformationMatrix(e) => e,
            EntityType::Sphere(e) => e,
            EntityType::Torus(e) => e,
            EntityType::SubfigureDefinition(e) => e,
            EntityType::TextFontDefinition(e) => e,
            EntityType::TextDisplayTemplate(e) => e,
            EntityType::ColorDefinition(e) => e,
            EntityType::LabelDisplayAssociativity(e) => e,
            EntityType::Unsupported(e) => e,
        }
    }

    /// Get a mutable reference to the entity trait object
    pub fn as_entity_mut(&mut self) -> &mut dyn Entity {
        match self {
            EntityType::Null(e) => e,
            EntityType::CircularArc(e) => e,
            EntityType::Line(e) => e,
            EntityType::Location(e) => e,
            EntityType::Direction(e) => e,
            EntityType::TransformationMatrix(e) => e,
            EntityType::Sphere(e) => e,
            EntityType::Torus(e) => e,
            EntityType::SubfigureDefinition(e) => e,
            EntityType::TextFontDefinition(e) => e,
            EntityType::TextDisplayTemplate(e) => e,
            EntityType::ColorDefinition(e) => e,
            EntityType::LabelDisplayAssociativity(e) => e,
            EntityType::Unsupported(e) => e,
        }
    }

    /// Every reference this entity holds: directory-level first, then
    /// type-specific.
    pub fn all_references(&self) -> Vec<EntityId> {
        let entity = self.as_entity();
        let mut refs = Vec::new();
        entity.common().references(&mut refs);
        entity.references(&mut refs);
        refs
    }

    /// Run the link pass over directory-level and type-specific references
    pub fn link(&mut self, linker: &mut Linker<'_>) {
        let entity = self.as_entity_mut();
        entity.common_mut().link(linker);
        entity.link(linker);
    }

    /// Whether parameter data is written and read without trailing
    /// associativity/property pointer groups
    pub fn is_opaque(&self) -> bool {
        matches!(self, EntityType::Null(_) | EntityType::Unsupported(_))
    }

    /// Get the transformation matrix entity, if this is one
    pub fn as_transformation_matrix(&self) -> Option<&TransformationMatrixEntity> {
        match self {
            EntityType::TransformationMatrix(m) => Some(m),
            _ => None,
        }
    }
}

macro_rules! impl_into_entity_type {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for EntityType {
                fn from(entity: $ty) -> Self {
                    EntityType::$variant(entity)
                }
            }
        )*
    };
}

impl_into_entity_type! {
    Null => Null,
    CircularArc => CircularArc,
    Line => Line,
    Location => Location,
    Direction => Direction,
    TransformationMatrix => TransformationMatrixEntity,
    Sphere => Sphere,
    Torus => Torus,
    SubfigureDefinition => SubfigureDefinition,
    TextFontDefinition => TextFontDefinition,
    TextDisplayTemplate => TextDisplayTemplate,
    ColorDefinition => ColorDefinition,
    LabelDisplayAssociativity => LabelDisplayAssociativity,
    Unsupported => Unsupported,
}

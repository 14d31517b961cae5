pub mod design;
pub mod environment;
pub mod layout;
pub mod location;
pub mod report;
pub mod request;
pub mod room;

pub use design::{
    CandidateConfiguration, Configuration, DesignFailure, DesignOutcome, DesignResult,
    DesignSummary, EnvironmentConditions, MetaInfo,
};
pub use environment::{
    EnvironmentRules, Factor, FactorReading, ReadingStatus, RoomReadingReport, RoomTargets,
    Season, SpecialConditions, TargetRange, TimeOfDay,
};
pub use layout::{
    ConstraintReport, ConstraintViolation, Footprint, RoomLayout, RoomPlacement, UnplacedRoom,
};
pub use location::{EnvironmentSample, LocationId, LocationTable, RoomLocations};
pub use report::{DetailedScores, EnergyReport, EnergyScores, Grade};
pub use request::{DesignRequest, WindowSide, Windows, MAX_ROOMS_PER_TYPE};
pub use room::{AreaAllocation, RoomAllocation, RoomType};

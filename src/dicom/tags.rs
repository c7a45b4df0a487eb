//! Registry of the DICOM attributes the pipeline knows by name
//!
//! The address table is a fixed subset of PS3.6. It is a versioned constant:
//! adding an identifier means adding its literal address here, never deriving it.

use dicom::core::Tag;
use std::fmt;

/// (group, element) address of a data element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagAddress {
    pub group: u16,
    pub element: u16,
}

impl TagAddress {
    #[must_use]
    pub const fn new(group: u16, element: u16) -> Self {
        Self { group, element }
    }
}

impl From<TagAddress> for Tag {
    fn from(address: TagAddress) -> Self {
        Tag(address.group, address.element)
    }
}

impl From<Tag> for TagAddress {
    fn from(tag: Tag) -> Self {
        Self::new(tag.0, tag.1)
    }
}

impl fmt::Display for TagAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:04X},{:04X})", self.group, self.element)
    }
}

/// Semantically named attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagIdentifier {
    Modality,
    SamplesPerPixel,
    PhotometricInterpretation,
    Rows,
    Columns,
    PixelAspectRatio,
    BitsAllocated,
    BitsStored,
    HighBit,
    PixelRepresentation,
    SmallestImagePixelValue,
    LargestImagePixelValue,
    PixelPaddingRangeLimit,
    ColorSpace,
    PixelData,
    ImageType,
    SliceThickness,
    SpacingBetweenSlices,
    ImagePosition,
    ImageOrientation,
    SliceLocation,
    PixelSpacing,
    WindowCenter,
    WindowWidth,
    RescaleIntercept,
    RescaleSlope,
    BodyPartExamined,
}

impl TagIdentifier {
    pub const ALL: [TagIdentifier; 27] = [
        Self::Modality,
        Self::SamplesPerPixel,
        Self::PhotometricInterpretation,
        Self::Rows,
        Self::Columns,
        Self::PixelAspectRatio,
        Self::BitsAllocated,
        Self::BitsStored,
        Self::HighBit,
        Self::PixelRepresentation,
        Self::SmallestImagePixelValue,
        Self::LargestImagePixelValue,
        Self::PixelPaddingRangeLimit,
        Self::ColorSpace,
        Self::PixelData,
        Self::ImageType,
        Self::SliceThickness,
        Self::SpacingBetweenSlices,
        Self::ImagePosition,
        Self::ImageOrientation,
        Self::SliceLocation,
        Self::PixelSpacing,
        Self::WindowCenter,
        Self::WindowWidth,
        Self::RescaleIntercept,
        Self::RescaleSlope,
        Self::BodyPartExamined,
    ];

    /// Address of this attribute in a dataset
    #[must_use]
    pub const fn address(self) -> TagAddress {
        let (group, element) = match self {
            Self::Modality => (0x0008, 0x0060),
            Self::SamplesPerPixel => (0x0028, 0x0002),
            Self::PhotometricInterpretation => (0x0028, 0x0004),
            Self::Rows => (0x0028, 0x0010),
            Self::Columns => (0x0028, 0x0011),
            Self::PixelAspectRatio => (0x0028, 0x0034),
            Self::BitsAllocated => (0x0028, 0x0100),
            Self::BitsStored => (0x0028, 0x0101),
            Self::HighBit => (0x0028, 0x0102),
            Self::PixelRepresentation => (0x0028, 0x0103),
            Self::SmallestImagePixelValue => (0x0028, 0x0106),
            Self::LargestImagePixelValue => (0x0028, 0x0107),
            Self::PixelPaddingRangeLimit => (0x0028, 0x0121),
            Self::ColorSpace => (0x0028, 0x2002),
            Self::PixelData => (0x7FE0, 0x0010),
            Self::ImageType => (0x0008, 0x0008),
            Self::SliceThickness => (0x0018, 0x0050),
            Self::SpacingBetweenSlices => (0x0018, 0x0088),
            Self::ImagePosition => (0x0020, 0x0032),
            Self::ImageOrientation => (0x0020, 0x0037),
            Self::SliceLocation => (0x0020, 0x1041),
            Self::PixelSpacing => (0x0028, 0x0030),
            Self::WindowCenter => (0x0028, 0x1050),
            Self::WindowWidth => (0x0028, 0x1051),
            Self::RescaleIntercept => (0x0028, 0x1052),
            Self::RescaleSlope => (0x0028, 0x1053),
            Self::BodyPartExamined => (0x0018, 0x0015),
        };
        TagAddress::new(group, element)
    }

    /// DICOM keyword of the attribute
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Modality => "Modality",
            Self::SamplesPerPixel => "SamplesPerPixel",
            Self::PhotometricInterpretation => "PhotometricInterpretation",
            Self::Rows => "Rows",
            Self::Columns => "Columns",
            Self::PixelAspectRatio => "PixelAspectRatio",
            Self::BitsAllocated => "BitsAllocated",
            Self::BitsStored => "BitsStored",
            Self::HighBit => "HighBit",
            Self::PixelRepresentation => "PixelRepresentation",
            Self::SmallestImagePixelValue => "SmallestImagePixelValue",
            Self::LargestImagePixelValue => "LargestImagePixelValue",
            Self::PixelPaddingRangeLimit => "PixelPaddingRangeLimit",
            Self::ColorSpace => "ColorSpace",
            Self::PixelData => "PixelData",
            Self::ImageType => "ImageType",
            Self::SliceThickness => "SliceThickness",
            Self::SpacingBetweenSlices => "SpacingBetweenSlices",
            Self::ImagePosition => "ImagePositionPatient",
            Self::ImageOrientation => "ImageOrientationPatient",
            Self::SliceLocation => "SliceLocation",
            Self::PixelSpacing => "PixelSpacing",
            Self::WindowCenter => "WindowCenter",
            Self::WindowWidth => "WindowWidth",
            Self::RescaleIntercept => "RescaleIntercept",
            Self::RescaleSlope => "RescaleSlope",
            Self::BodyPartExamined => "BodyPartExamined",
        }
    }

    #[inline]
    #[must_use]
    pub fn tag(self) -> Tag {
        self.address().into()
    }
}

/// Resolve an attribute name to its address
#[inline]
#[must_use]
pub const fn resolve(tag: TagIdentifier) -> TagAddress {
    tag.address()
}

impl fmt::Display for TagIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.address(), self.name())
    }
}

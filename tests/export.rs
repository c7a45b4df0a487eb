//! End-to-end export of DICOM files written to a temporary directory

use assert_matches::assert_matches;
use ctwin::api::{self, Handle};
use ctwin::config::ExportConfig;
use ctwin::dicom::{Modality, PhotometricInterpretation, TagIdentifier};
use ctwin::types::{ImageDimensions, PixelRepresentation, Windowing};
use ctwin::{DicomImage, ExportError, LoadState};
use dicom::core::{DataElement, PrimitiveValue, Tag, VR};
use dicom::dictionary_std::{tags, uids};
use dicom::object::{FileMetaTableBuilder, InMemDicomObject};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SOP_INSTANCE_UID: &str = "1.2.826.0.1.3680043.2.1125.7";

/// Builder for small single-frame 16-bit images
struct TestFile {
    rows: u16,
    cols: u16,
    pixels: Vec<u16>,
    attributes: Vec<(Tag, VR, String)>,
}

impl TestFile {
    fn ct(pixels: &[u16]) -> Self {
        Self {
            rows: 1,
            cols: pixels.len() as u16,
            pixels: pixels.to_vec(),
            attributes: vec![
                (tags::MODALITY, VR::CS, "CT".into()),
                (tags::PHOTOMETRIC_INTERPRETATION, VR::CS, "MONOCHROME2".into()),
                (tags::RESCALE_SLOPE, VR::DS, "1".into()),
                (tags::RESCALE_INTERCEPT, VR::DS, "-1024".into()),
                (tags::WINDOW_WIDTH, VR::DS, "400".into()),
                (tags::WINDOW_CENTER, VR::DS, "40".into()),
            ],
        }
    }

    fn set(mut self, tag: Tag, vr: VR, value: &str) -> Self {
        self.attributes.retain(|(t, ..)| *t != tag);
        self.attributes.push((tag, vr, value.to_string()));
        self
    }

    fn without(mut self, tag: Tag) -> Self {
        self.attributes.retain(|(t, ..)| *t != tag);
        self
    }

    fn signed(self) -> Self {
        self.set(tags::PIXEL_REPRESENTATION, VR::US, "1")
    }

    fn write(&self, dir: &Path, name: &str) -> PathBuf {
        let pixel_representation: u16 = self
            .attributes
            .iter()
            .find(|(t, ..)| *t == tags::PIXEL_REPRESENTATION)
            .map_or(0, |(.., v)| v.parse().expect("Invalid pixel representation"));

        let mut obj = InMemDicomObject::from_element_iter([
            DataElement::new(tags::SOP_CLASS_UID, VR::UI, PrimitiveValue::from(uids::CT_IMAGE_STORAGE)),
            DataElement::new(tags::SOP_INSTANCE_UID, VR::UI, PrimitiveValue::from(SOP_INSTANCE_UID)),
            DataElement::new(tags::SAMPLES_PER_PIXEL, VR::US, PrimitiveValue::from(1_u16)),
            DataElement::new(tags::ROWS, VR::US, PrimitiveValue::from(self.rows)),
            DataElement::new(tags::COLUMNS, VR::US, PrimitiveValue::from(self.cols)),
            DataElement::new(tags::BITS_ALLOCATED, VR::US, PrimitiveValue::from(16_u16)),
            DataElement::new(tags::BITS_STORED, VR::US, PrimitiveValue::from(16_u16)),
            DataElement::new(tags::HIGH_BIT, VR::US, PrimitiveValue::from(15_u16)),
            DataElement::new(
                tags::PIXEL_REPRESENTATION,
                VR::US,
                PrimitiveValue::from(pixel_representation),
            ),
            DataElement::new(
                tags::PIXEL_DATA,
                VR::OW,
                PrimitiveValue::U16(self.pixels.iter().copied().collect()),
            ),
        ]);
        for (tag, vr, value) in &self.attributes {
            if *tag != tags::PIXEL_REPRESENTATION {
                obj.put(DataElement::new(*tag, *vr, PrimitiveValue::from(value.as_str())));
            }
        }

        let path = dir.join(name);
        obj.with_meta(
            FileMetaTableBuilder::new()
                .transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN)
                .media_storage_sop_class_uid(uids::CT_IMAGE_STORAGE)
                .media_storage_sop_instance_uid(SOP_INSTANCE_UID),
        )
        .expect("Failed to build file meta")
        .write_to_file(&path)
        .expect("Failed to write DICOM file");
        path
    }
}

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn write_presets(dir: &Path) -> PathBuf {
    let path = dir.join("presets.json");
    std::fs::write(
        &path,
        r#"{ "Lung": { "width": [1500, 400], "level": [-600, 40] } }"#,
    )
    .expect("Failed to write presets");
    path
}

fn gray_pixels(path: &Path) -> Vec<u8> {
    image::open(path)
        .expect("Failed to open output image")
        .into_luma8()
        .into_raw()
}

#[test]
fn test_soft_tissue_window_monochrome2() {
    let dir = temp_dir();
    let input = TestFile::ct(&[1064, 0, 4000]).write(dir.path(), "ct.dcm");
    let output = dir.path().join("ct.png");

    let mut image = DicomImage::new(&input).with_output(&output);
    let loaded = image.load().expect("CT image should load");

    assert_eq!(loaded.modality, Modality::ComputedTomography);
    assert_eq!(loaded.data.dimensions, ImageDimensions::new(3, 1));
    assert_eq!(loaded.data.bytes_per_pixel, 2);
    assert_eq!(loaded.data.windowing, Windowing::new(vec![400.0], vec![40.0]));
    assert_eq!(loaded.image.as_luma8().unwrap().as_raw(), &vec![128, 0, 255]);
    assert_eq!(gray_pixels(&output), vec![128, 0, 255]);
}

#[test]
fn test_soft_tissue_window_monochrome1() {
    let dir = temp_dir();
    let input = TestFile::ct(&[1064, 0, 4000])
        .set(tags::PHOTOMETRIC_INTERPRETATION, VR::CS, "MONOCHROME1")
        .write(dir.path(), "ct.dcm");

    let mut image = DicomImage::new(&input);
    let loaded = image.load().expect("CT image should load");

    assert_eq!(
        loaded.data.photometric_interpretation,
        PhotometricInterpretation::Monochrome1
    );
    assert_eq!(loaded.image.as_luma8().unwrap().as_raw(), &vec![127, 255, 0]);
}

#[test]
fn test_signed_pixels() {
    let dir = temp_dir();
    let raw = [(-1000_i16) as u16, 40_i16 as u16];
    let input = TestFile::ct(&raw)
        .signed()
        .set(tags::RESCALE_INTERCEPT, VR::DS, "0")
        .write(dir.path(), "signed.dcm");

    let mut image = DicomImage::new(&input);
    let loaded = image.load().expect("CT image should load");

    assert_eq!(loaded.data.pixel_representation, PixelRepresentation::Signed);
    assert_eq!(loaded.image.as_luma8().unwrap().as_raw(), &vec![0, 128]);
}

#[test]
fn test_mr_is_rejected_without_image_data() {
    let dir = temp_dir();
    let input = TestFile::ct(&[1064])
        .set(tags::MODALITY, VR::CS, "MR")
        .write(dir.path(), "mr.dcm");
    let output = dir.path().join("mr.png");

    let mut image = DicomImage::new(&input).with_output(&output);
    assert_matches!(
        image.load().map(|_| ()),
        Err(ExportError::UnsupportedForExport(code)) if code == "MR"
    );
    assert!(image.image_data().is_none());
    assert!(!output.exists());

    // The dataset stays readable after a rejected load
    assert_eq!(image.read_tag(TagIdentifier::Modality).unwrap(), "MR");
}

#[test]
fn test_unknown_and_missing_modality() {
    let dir = temp_dir();
    let unknown = TestFile::ct(&[0])
        .set(tags::MODALITY, VR::CS, "XX")
        .write(dir.path(), "xx.dcm");
    let missing = TestFile::ct(&[0])
        .without(tags::MODALITY)
        .write(dir.path(), "none.dcm");

    assert_matches!(
        DicomImage::new(&unknown).load().map(|_| ()),
        Err(ExportError::UnsupportedModality(code)) if code == "XX"
    );
    assert_matches!(
        DicomImage::new(&missing).load().map(|_| ()),
        Err(ExportError::UnsupportedModality(code)) if code.is_empty()
    );
}

#[test]
fn test_preset_window_for_body_part() {
    let dir = temp_dir();
    let presets = write_presets(dir.path());
    let input = TestFile::ct(&[1064])
        .without(tags::WINDOW_WIDTH)
        .without(tags::WINDOW_CENTER)
        .set(tags::BODY_PART_EXAMINED, VR::CS, "LUNG")
        .write(dir.path(), "lung.dcm");

    let config = ExportConfig::new(&input).with_presets(&presets);
    let handle = api::new_handle(&config).expect("CT image should load");

    let data = handle.image_data().expect("Loaded handle has image data");
    assert_eq!(data.windowing, Windowing::new(vec![1500.0, 400.0], vec![-600.0, 40.0]));
}

#[test]
fn test_mismatched_windows_fall_back_to_default() {
    let dir = temp_dir();
    let presets = write_presets(dir.path());
    let input = TestFile::ct(&[1064])
        .set(tags::WINDOW_WIDTH, VR::DS, "400\\100")
        .set(tags::BODY_PART_EXAMINED, VR::CS, "KNEE")
        .write(dir.path(), "knee.dcm");

    let config = ExportConfig::new(&input).with_presets(&presets);
    let handle = api::new_handle(&config).expect("CT image should load");

    assert_eq!(handle.image_data().unwrap().windowing, Windowing::fallback());
}

#[test]
fn test_broken_preset_table_is_not_fatal() {
    let dir = temp_dir();
    let presets = dir.path().join("broken.json");
    std::fs::write(&presets, "{ \"Lung\": ").expect("Failed to write presets");
    let input = TestFile::ct(&[1064])
        .without(tags::WINDOW_WIDTH)
        .set(tags::BODY_PART_EXAMINED, VR::CS, "LUNG")
        .write(dir.path(), "lung.dcm");

    let config = ExportConfig::new(&input).with_presets(&presets);
    let handle = api::new_handle(&config).expect("CT image should load");

    assert_eq!(handle.image_data().unwrap().windowing, Windowing::fallback());
}

#[test]
fn test_metadata_json_excludes_pixel_data() {
    let dir = temp_dir();
    let input = TestFile::ct(&[1064, 1064, 1064, 1064])
        .set(tags::WINDOW_WIDTH, VR::DS, "400\\1500")
        .set(tags::WINDOW_CENTER, VR::DS, "40\\-600")
        .write(dir.path(), "ct.dcm");

    let handle = api::new_handle(&ExportConfig::new(&input)).expect("CT image should load");
    let json: serde_json::Value =
        serde_json::from_str(&handle.get_metadata().unwrap()).expect("Metadata is JSON");

    assert_eq!(json["dimensions"]["width"], 4);
    assert_eq!(json["dimensions"]["height"], 1);
    assert_eq!(json["bytes_per_pixel"], 2);
    assert_eq!(json["samples_per_pixel"], 1);
    assert_eq!(json["slope"], 1.0);
    assert_eq!(json["intercept"], -1024.0);
    assert_eq!(json["photometric_interpretation"], "MONOCHROME2");
    assert_eq!(json["windowing"]["width"], serde_json::json!([400.0, 1500.0]));
    assert_eq!(json["windowing"]["level"], serde_json::json!([40.0, -600.0]));
    assert!(json.get("pixel_data").is_none());
}

#[test]
fn test_load_runs_once() {
    let dir = temp_dir();
    let input = TestFile::ct(&[1064]).write(dir.path(), "ct.dcm");
    let mut handle = Handle::new(&ExportConfig::new(&input));

    assert_matches!(handle.image().state(), LoadState::Unloaded);
    handle.load().expect("CT image should load");

    std::fs::remove_file(&input).expect("Failed to remove input");
    handle.load().expect("Second load returns the recorded outcome");
    assert_matches!(handle.image().state(), LoadState::Loaded(_));
}

#[test]
fn test_jpeg_output() {
    let dir = temp_dir();
    let input = TestFile::ct(&[1064; 16]).write(dir.path(), "ct.dcm");
    let output = dir.path().join("ct.jpg");

    api::new_handle(&ExportConfig::new(&input).with_output(&output))
        .expect("CT image should load");

    assert_eq!(
        image::ImageFormat::from_path(&output).unwrap(),
        image::ImageFormat::Jpeg
    );
    let written = image::open(&output).expect("Failed to open output image");
    assert_eq!((written.width(), written.height()), (16, 1));
}

#[test]
fn test_unwritable_output() {
    let dir = temp_dir();
    let input = TestFile::ct(&[1064]).write(dir.path(), "ct.dcm");
    let output = dir.path().join("no").join("such").join("dir.png");

    let result = api::new_handle(&ExportConfig::new(&input).with_output(&output));
    assert_matches!(result.err(), Some(ExportError::OutputWriteFailed(_)));
}

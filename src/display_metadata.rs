use crate::dicom::TagIdentifier;
use crate::object::DicomImage;
use crate::types::ImageData;

pub fn print_metadata(image: &DicomImage) {
    println!("{:20}: {}", "File", image.path().display());

    print_tag(image, "Modality", TagIdentifier::Modality);
    print_tag(image, "Body Part Examined", TagIdentifier::BodyPartExamined);
    print_tag(image, "Slice Thickness", TagIdentifier::SliceThickness);
    print_tag(image, "Pixel Spacing", TagIdentifier::PixelSpacing);

    if let Some(data) = image.image_data() {
        print_dimensions(data);
        print_rescale(data);
        println!("{:20}: {}", "Windowing", data.windowing);
    }

    println!();
}

fn print_tag(image: &DicomImage, name: &str, tag: TagIdentifier) {
    if let Ok(v) = image.read_tag(tag) {
        println!("{name:20}: {v}");
    }
}

fn print_dimensions(data: &ImageData) {
    println!(
        "{:20}: {}x{} [{}]",
        "Dimensions", data.dimensions, data.samples_per_pixel, data.photometric_interpretation
    );
    println!(
        "{:20}: {} ({:?})",
        "Bytes Per Sample", data.bytes_per_pixel, data.pixel_representation
    );
}

fn print_rescale(data: &ImageData) {
    println!("{:20}: {}", "Rescale", data.rescale());
}

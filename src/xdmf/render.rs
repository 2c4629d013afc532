use std::collections::BTreeSet;
use quick_xml::escape::escape;
use crate::volume::{Observation, VolumeFile, CONNECTIVITY, COORDINATES, VOLUME_GROUP};
use super::error::Error;




const HEADER: &str = "<?xml version=\"1.0\" ?>\n\
    <!DOCTYPE Xdmf SYSTEM \"Xdmf.dtd\">\n\
    <Xdmf Version=\"2.0\">\n\
    <Domain>\n\
    <Grid Name=\"Evolution\" GridType=\"Collection\" CollectionType=\"Temporal\">\n";

const FOOTER: &str = "</Grid>\n</Domain>\n</Xdmf>";

const AXES: [&str; 3] = ["_x", "_y", "_z"];




/**
 * Number of points and hexahedral cells in a set of elements.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshSize {
    pub points: u64,
    pub cells: u64,
}




// ============================================================================
impl MeshSize {

    /**
     * Count the points and cells of the elements whose extents are given
     * flattened, entry `i` belonging to axis `i % 3`. Returns `None` if the
     * extents do not split into whole elements.
     */
    pub fn from_extents(extents: &[u64]) -> Option<Self> {
        if extents.len() % 3 != 0 {
            return None;
        }
        let points = extents.chunks_exact(3).map(|e| e[0] * e[1] * e[2]).sum();
        let cells = extents
            .chunks_exact(3)
            .map(|e| e[0].saturating_sub(1) * e[1].saturating_sub(1) * e[2].saturating_sub(1))
            .sum();
        Some(Self { points, cells })
    }
}




/**
 * How a tensor component is presented: either on its own, or as the x
 * component of a vector whose three components are joined.
 */
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Field {
    Scalar(String),
    Vector(String),
}




/**
 * Group tensor components into fields, keeping their order. `NAME_x` becomes
 * the vector `NAME` when `NAME_y` and `NAME_z` are present too, and those two
 * are then absorbed into it. Everything else is a scalar.
 */
pub fn classify_components<S: AsRef<str>>(components: &[S]) -> Vec<Field> {
    let names: BTreeSet<&str> = components.iter().map(|c| c.as_ref()).collect();
    let vector_base = |name: &str| -> Option<String> {
        let suffix = AXES.iter().find(|axis| name.ends_with(*axis))?;
        let base = &name[..name.len() - suffix.len()];
        let complete = AXES.iter().all(|axis| names.contains(format!("{}{}", base, axis).as_str()));
        if complete { Some(base.to_string()) } else { None }
    };

    components
        .iter()
        .map(|c| c.as_ref())
        .filter_map(|name| match vector_base(name) {
            Some(base) if name.ends_with("_x") => Some(Field::Vector(base)),
            Some(_) => None,
            None => Some(Field::Scalar(name.to_string())),
        })
        .collect()
}




/**
 * Format an observation value in C's `%1.14e` style (a signed exponent of at
 * least two digits), so that readers parse back exactly the value stored.
 */
pub fn format_time(value: f64) -> String {
    let formatted = format!("{:.14e}", value);

    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => formatted,
    }
}




/**
 * Render the XDMF document: one temporal entry per observation, each holding
 * one uniform grid per file. The grids point into the volume files; no data
 * is copied.
 */
pub fn render<F: VolumeFile>(files: &[F], observations: &[Observation]) -> Result<String, Error> {
    let mut xml = String::from(HEADER);

    for observation in observations {
        xml.push_str("  <Grid Name=\"Grids\" GridType=\"Collection\">\n");
        xml.push_str(&format!("    <Time Value=\"{}\"/>\n", format_time(observation.value)));

        for file in files {
            render_grid(&mut xml, file, &observation.name)?;
        }
        xml.push_str("  </Grid>\n");
    }
    xml.push_str(FOOTER);
    Ok(xml)
}

fn render_grid<F: VolumeFile>(xml: &mut String, file: &F, observation: &str) -> Result<(), Error> {
    let extents = file.extents(observation)?;
    let size = MeshSize::from_extents(&extents).ok_or_else(|| Error::MalformedExtents {
        path: file.path().to_string(),
        observation: observation.to_string(),
        len: extents.len(),
    })?;
    let grid_path = format!("{}:/{}/{}", escape(file.path()), VOLUME_GROUP, escape(observation));
    let data_item = format!(
        "        <DataItem Dimensions=\" {}\" NumberType=\"Double\" Precision=\"8\" Format=\"HDF5\">\n",
        size.points
    );
    let dataset = |name: &str| format!("{}          {}/{}\n        </DataItem>\n", data_item, grid_path, escape(name));

    xml.push_str(&format!("    <Grid Name=\"{}\" GridType=\"Uniform\">\n", escape(file.path())));

    xml.push_str(&format!("      <Topology TopologyType=\"Hexahedron\" NumberOfElements=\"{}\">\n", size.cells));
    xml.push_str(&format!("        <DataItem Dimensions=\"{} 8\" NumberType=\"Int\" Format=\"HDF5\">\n", size.cells));
    xml.push_str(&format!("          {}/{}\n", grid_path, CONNECTIVITY));
    xml.push_str("        </DataItem>\n      </Topology>\n");

    xml.push_str("      <Geometry Type=\"X_Y_Z\">\n");
    for coordinate in &COORDINATES {
        xml.push_str(&dataset(coordinate));
    }
    xml.push_str("      </Geometry>\n");

    for field in classify_components(&file.tensor_components(observation)?) {
        match field {
            Field::Vector(name) => {
                xml.push_str(&format!(
                    "      <Attribute Name=\"{}\" AttributeType=\"Vector\" Center=\"Node\">\n",
                    escape(&name)
                ));
                xml.push_str(&format!(
                    "        <DataItem Dimensions=\" {} 3\" ItemType = \"Function\" Function = \"JOIN($0,$1,$2)\">\n",
                    size.points
                ));
                for axis in &AXES {
                    xml.push_str(&dataset(&format!("{}{}", name, axis)));
                }
                xml.push_str("        </DataItem>\n");
            }
            Field::Scalar(name) => {
                xml.push_str(&format!(
                    "      <Attribute Name=\"{}\" AttributeType=\"Scalar\" Center=\"Node\">\n",
                    escape(&name)
                ));
                xml.push_str(&dataset(&name));
            }
        }
        xml.push_str("      </Attribute>\n");
    }
    xml.push_str("    </Grid>\n");
    Ok(())
}

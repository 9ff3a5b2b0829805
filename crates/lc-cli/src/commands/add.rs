//! Add command - loads one record through the catalog loaders.

use anyhow::{Context, Result};
use lc_core::{Entity, FileProbe, ManualProbe};
use lc_store::write::{
    load_dataset, load_fabrication, load_material, load_measurementtype, load_panel,
    load_registration, load_sample, load_ut_measurement, load_xct_measurement, NewDataset,
    NewMaterial, NewMeasurement, NewPanel, NewRegistration, NewSample, SignalType, UtSettings,
    XctSettings,
};
use lc_store::CatalogDb;
use std::path::Path;

use crate::cli::{AddCommands, GlobalArgs, MeasurementArgs, SignalArg};
use crate::commands::common::{parse_metadata, parse_transform, resolve_name};
use crate::context::CatalogContext;

/// Execute the add command
pub(crate) fn execute(command: &AddCommands, global: &GlobalArgs) -> Result<()> {
    let ctx = CatalogContext::open(global)?;
    let db = &ctx.db;

    let (kind, id) = match command {
        AddCommands::Material(args) => {
            let material = NewMaterial {
                name: args.name.clone(),
                layer_thickness: args.layer_thickness,
                extra: parse_metadata(&args.meta.meta)?,
            };
            ("material", load_material(db, &material)?)
        }
        AddCommands::Fabrication(args) => {
            let extra = parse_metadata(&args.meta.meta)?;
            ("fabrication", load_fabrication(db, &args.name, &extra)?)
        }
        AddCommands::Measurementtype(args) => {
            let extra = parse_metadata(&args.meta.meta)?;
            ("measurement type", load_measurementtype(db, &args.name, &extra)?)
        }
        AddCommands::Panel(args) => {
            let panel = NewPanel {
                name: args.name.clone(),
                material_id: resolve_name(db, Entity::Material, &args.material)?,
                fabrication_id: resolve_name(db, Entity::Fabrication, &args.fabrication)?,
                height: args.dimensions.height,
                width: args.dimensions.width,
                thickness: args.dimensions.thickness,
                edges_cutted: args.edges_cutted,
                layer_layout: args.layer_layout.clone(),
                description: args.description.clone(),
                extra: parse_metadata(&args.meta.meta)?,
            };
            ("panel", load_panel(db, &panel)?)
        }
        AddCommands::Sample(args) => {
            let sample = NewSample {
                name: args.name.clone(),
                panel_id: resolve_name(db, Entity::Panel, &args.panel)?,
                height: args.dimensions.height,
                width: args.dimensions.width,
                thickness: args.dimensions.thickness,
                keyhole: args.keyhole,
                parallel_faces: args.parallel_faces,
                description: args.description.clone(),
                extra: parse_metadata(&args.meta.meta)?,
            };
            ("sample", load_sample(db, &sample)?)
        }
        AddCommands::Ut(args) => {
            let measurement = new_measurement(db, &args.measurement)?;
            let settings = UtSettings {
                signal_type: match args.signal_type {
                    SignalArg::Rf => SignalType::Rf,
                    SignalArg::Amplitude => SignalType::Amplitude,
                },
                axes_order: args.axes_order.clone(),
            };
            ("UT measurement", load_ut_measurement(db, &measurement, &settings)?)
        }
        AddCommands::Xct(args) => {
            let measurement = new_measurement(db, &args.measurement)?;
            let settings = XctSettings {
                aligned: args.aligned,
                equalized: args.equalized,
            };
            ("XCT measurement", load_xct_measurement(db, &measurement, &settings)?)
        }
        AddCommands::Dataset(args) => {
            let dataset = NewDataset {
                name: args.name.clone(),
                description: args.description.clone(),
                measurement_paths: args.measurements.clone(),
                targets: args.targets.clone(),
                extra: parse_metadata(&args.meta.meta)?,
            };
            ("dataset", load_dataset(db, &dataset)?)
        }
        AddCommands::Registration(args) => {
            let registration = NewRegistration {
                reference_file_path: args.reference.clone(),
                registered_file_path: args.registered.clone(),
                transform: parse_transform(&args.transform)?,
                method: args.method.clone(),
                extra: parse_metadata(&args.meta.meta)?,
            };
            ("registration", load_registration(db, &registration)?)
        }
    };

    println!("Added {kind} with id {id} to {}", ctx.database_path);
    Ok(())
}

fn new_measurement(db: &CatalogDb, args: &MeasurementArgs) -> Result<NewMeasurement> {
    let probe = ManualProbe {
        height: args.height,
        width: args.width,
        depth: args.depth,
        dtype: args.dtype.clone(),
    };
    let info = probe
        .probe(Path::new(&args.file_path))
        .context("Failed to describe measurement file")?;

    Ok(NewMeasurement {
        file_path: args.file_path.clone(),
        measurementtype_id: resolve_name(db, Entity::MeasurementType, &args.measurementtype)?,
        info,
        sample_names: args.samples.clone(),
        parent_measurement_path: args.parent.clone(),
        transformations: args.transformations.clone(),
        extra: parse_metadata(&args.meta.meta)?,
    })
}

use anyhow::{Ok, Result};
use districtlens::{AxisSelection, Dashboard, Dataset, read_campuses, read_districts};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::RenderArgs) -> Result<()> {
    let out_path = &args.output.clone().unwrap_or("./scatter.svg".into());

    println!("[render] loading districts from {}", args.districts.display());
    let districts = read_districts(&args.districts)?;
    println!("[render] loading campuses from {}", args.campuses.display());
    let campuses = read_campuses(&args.campuses)?;
    let dataset = Dataset::build(districts, campuses);
    println!(
        "[render] dataset has {} districts and {} campuses",
        dataset.len(),
        dataset.campus_count()
    );

    let mut dashboard = Dashboard::new(dataset);
    if let Some(mode) = args.fill {
        dashboard.set_fill_mode(mode);
    }

    let mut selection = AxisSelection::default();
    if let Some(field) = args.x_field {
        selection.x = field;
    }
    if let Some(field) = args.y_field {
        selection.y = field;
    }
    let counts = dashboard.set_selection(selection);
    println!("[render] painted {} marks ({} x {})", counts.entered, selection.x, selection.y);

    println!("[render] writing scatter to {}", out_path.display());
    dashboard.to_svg(out_path)?;

    Ok(())
}

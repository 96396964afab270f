use anyhow::{Ok, Result, bail};
use districtlens::{Dataset, DistrictId, DrilldownView, read_campuses, read_districts};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::DrilldownArgs) -> Result<()> {
    let out_path = &args.output.clone().unwrap_or("./drilldown.svg".into());

    println!("[drilldown] loading districts from {}", args.districts.display());
    let districts = read_districts(&args.districts)?;
    println!("[drilldown] loading campuses from {}", args.campuses.display());
    let campuses = read_campuses(&args.campuses)?;
    let dataset = Dataset::build(districts, campuses);

    let id = DistrictId::new(&args.district);
    let Some(district) = dataset.district(&id) else {
        bail!("[drilldown] Unknown district id: {}", args.district);
    };

    let view = DrilldownView::build(district, dataset.campuses(&id));
    println!("[drilldown] laid out {} campus rows for {}", view.row_count(), view.title());

    println!("[drilldown] writing drill-down to {}", out_path.display());
    view.to_svg(out_path)?;

    Ok(())
}

use console::Style;
use mgc_core::multiscale::median_transform::layer_dilation;
use mgc_core::multiscale::DecompositionParameters;
use mgc_core::pipeline::MgcConfig;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    warn: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            warn: Style::new().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_correct_summary(config: &MgcConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Multiscale Gradient Correction"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(30)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Target"),
        s.path.apply_to(config.target.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Reference"),
        s.path.apply_to(config.reference.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output.display())
    );
    println!();

    println!("  {}", s.header.apply_to("Correction"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Layers"),
        s.value.apply_to(config.correction.layers)
    );
    let k = config.correction.k;
    if (0.0..=1.0).contains(&k) {
        println!("    {:<12}{}", s.label.apply_to("k"), s.value.apply_to(k));
    } else {
        println!(
            "    {:<12}{} {}",
            s.label.apply_to("k"),
            s.value.apply_to(k),
            s.warn.apply_to("(outside 0..1)")
        );
    }
    println!();
}

pub fn print_decompose_summary(params: &DecompositionParameters) {
    let s = Styles::new();

    println!();
    println!("  {}", s.header.apply_to("Median Decomposition"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Layers"),
        s.value.apply_to(params.layer_count)
    );
    let steps: Vec<String> = (0..params.layer_count)
        .map(|scale| layer_dilation(scale, usize::MAX).to_string())
        .collect();
    println!(
        "    {:<12}{}",
        s.label.apply_to("Dilation"),
        s.value.apply_to(steps.join(", "))
    );
    println!();
}

use sphere_tracer::{render_to_file, RenderSettings, Scene, TraceSettings};

fn main()
{
    tracing_subscriber::fmt::init();

    let scene = Scene::reference();
    let settings = RenderSettings::default();

    if let Err(e) = render_to_file(&scene, &settings, TraceSettings::default())
    {
        tracing::error!("render failed: {}", e);
        std::process::exit(1);
    }
}

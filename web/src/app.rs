use crate::query::query_pairs;
use gloo::timers::future::sleep;
use log::{debug, error, info};
use rlife_lib::{Config, Frame, StopHandle};
use yew::{html, platform::spawn_local, Component, Context, Html};

/// What the page keeps of one generation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    generation: u64,
    population: usize,
    text: String,
}

impl From<Frame<'_>> for Snapshot {
    fn from(frame: Frame<'_>) -> Self {
        Snapshot {
            generation: frame.generation,
            population: frame.population(),
            text: frame.text.to_owned(),
        }
    }
}

pub struct App {
    /// `None` if the URL query is invalid.
    config: Option<Config>,
    snapshot: Snapshot,
    error: Option<String>,
    /// The handle of the running driver, if any.
    stop: Option<StopHandle>,
    /// Tells messages of the current driver from those of a stopped one.
    run_id: u32,
}

#[derive(Debug)]
pub enum Msg {
    Frame(u32, Snapshot),
    Stopped(u32),
    Stop,
    Restart,
}

impl App {
    /// Seeds a new world from the configuration and starts a driver on it.
    fn start(&mut self, ctx: &Context<Self>) {
        self.stop_driver();
        self.run_id += 1;
        self.snapshot = Snapshot::default();

        let config = match &self.config {
            Some(config) => config,
            None => return,
        };
        let mut driver = match config.driver() {
            Ok(driver) => driver,
            Err(e) => {
                error!("{}", e);
                self.error = Some(e.to_string());
                return;
            }
        };
        self.error = None;
        self.stop = Some(driver.stop_handle());

        let id = self.run_id;
        let on_frame = ctx.link().callback(move |snapshot| Msg::Frame(id, snapshot));
        let on_stop = ctx.link().callback(move |()| Msg::Stopped(id));
        info!("Starting run {}", id);
        spawn_local(async move {
            let mut renderer = |frame: Frame<'_>| on_frame.emit(Snapshot::from(frame));
            let mut timer = sleep;
            let rendered = driver
                .run(&mut renderer, &mut timer)
                .await
                .unwrap_or_else(|e| match e {});
            debug!("Run {} rendered {} generations", id, rendered);
            on_stop.emit(());
        });
    }

    fn stop_driver(&mut self) {
        if let Some(stop) = self.stop.take() {
            stop.stop();
        }
    }

    fn buttons(&self, ctx: &Context<Self>) -> Html {
        let running = self.stop.is_some();
        html! {
            <div class="buttons">
                <button class="mui-btn mui-btn--raised"
                    disabled={!running}
                    onclick={ctx.link().callback(|_| Msg::Stop)}>
                    <span>
                        <abbr title="Stop the simulation.">
                            { "Stop" }
                        </abbr>
                    </span>
                </button>
                <button class="mui-btn mui-btn--raised"
                    disabled={self.config.is_none()}
                    onclick={ctx.link().callback(|_| Msg::Restart)}>
                    <span>
                        <abbr title="Seed a new world with the same settings.">
                            { "Restart" }
                        </abbr>
                    </span>
                </button>
            </div>
        }
    }

    fn data(&self) -> Html {
        let status = if self.stop.is_some() {
            "Running"
        } else {
            "Stopped"
        };
        html! {
            <ul id="data" class="mui-list--inline">
                <li>
                    <abbr title="The displayed generation.">
                        { "Generation" }
                    </abbr>
                    { ": " }
                    { self.snapshot.generation }
                </li>
                <li>
                    <abbr title="Number of living cells in the displayed generation.">
                        { "Cells" }
                    </abbr>
                    { ": " }
                    { self.snapshot.population }
                </li>
                <li>{ status }</li>
            </ul>
        }
    }

    fn world(&self) -> Html {
        match &self.error {
            Some(error) => html! {
                <p id="error" class="mui--text-danger">{ error }</p>
            },
            None => html! {
                <pre id="world">{ &self.snapshot.text }</pre>
            },
        }
    }
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let (config, error) = match Config::from_pairs(query_pairs()) {
            Ok(config) => (Some(config), None),
            Err(e) => {
                error!("{}", e);
                (None, Some(e.to_string()))
            }
        };
        let mut app = App {
            config,
            snapshot: Snapshot::default(),
            error,
            stop: None,
            run_id: 0,
        };
        app.start(ctx);
        app
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Frame(id, snapshot) => {
                if id != self.run_id {
                    return false;
                }
                self.snapshot = snapshot;
            }
            Msg::Stopped(id) => {
                if id != self.run_id {
                    return false;
                }
                self.stop = None;
            }
            Msg::Stop => self.stop_driver(),
            Msg::Restart => self.start(ctx),
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div id="rlife" class="mui-container-fluid">
                <div class="mui-panel">
                    { self.buttons(ctx) }
                    { self.data() }
                </div>
                { self.world() }
            </div>
        }
    }

    fn destroy(&mut self, _: &Context<Self>) {
        self.stop_driver();
    }
}

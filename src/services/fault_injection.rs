use rand::Rng;

/// Places in the trip service where a simulated backend failure can happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultPoint {
    CreateTrip,
    DeleteTrip,
}

/// Decides whether a simulated failure fires.
///
/// Any `Fn(FaultPoint) -> bool` closure works, which is how tests force the
/// failure and success paths.
pub trait FaultInjector: Send + Sync {
    fn should_fail(&self, point: FaultPoint) -> bool;
}

impl<F> FaultInjector for F
where
    F: Fn(FaultPoint) -> bool + Send + Sync,
{
    fn should_fail(&self, point: FaultPoint) -> bool {
        self(point)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoFaults;

impl FaultInjector for NoFaults {
    fn should_fail(&self, _point: FaultPoint) -> bool {
        false
    }
}

/// Fails each fault point with a fixed probability.
#[derive(Debug, Clone, Copy)]
pub struct RandomFaults {
    create_rate: f64,
    delete_rate: f64,
}

impl RandomFaults {
    pub fn new(create_rate: f64, delete_rate: f64) -> Self {
        Self {
            create_rate: create_rate.clamp(0.0, 1.0),
            delete_rate: delete_rate.clamp(0.0, 1.0),
        }
    }
}

impl FaultInjector for RandomFaults {
    fn should_fail(&self, point: FaultPoint) -> bool {
        let rate = match point {
            FaultPoint::CreateTrip => self.create_rate,
            FaultPoint::DeleteTrip => self.delete_rate,
        };
        rand::thread_rng().gen_bool(rate)
    }
}

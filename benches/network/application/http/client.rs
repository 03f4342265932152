use criterion::{BatchSize, Criterion, Throughput};
use efifetch::network::application::http::{
    BODY_CAPACITY, Client, ExchangeConfig, InlinePool, OperationToken, Options, Request,
    StatusCode,
};
use efifetch::network::error::{AcquireError, Status};
use efifetch::network::{Clock, Http, ServiceBinding, Time};

const PAYLOAD: &[u8] = b"BGGP5: the smallest file that downloads https://binary.golf/5/5";

struct LoopbackBinding {
    polls_to_complete: u32,
}

impl ServiceBinding for LoopbackBinding {
    type Controller = u8;
    type Child = LoopbackHttp;

    fn create_child(&mut self, _controller: u8) -> Result<LoopbackHttp, AcquireError> {
        Ok(LoopbackHttp {
            polls_to_complete: self.polls_to_complete,
            polls: 0,
        })
    }

    fn destroy_child(&mut self, _child: LoopbackHttp) -> Result<(), Status> {
        Ok(())
    }
}

struct LoopbackHttp {
    polls_to_complete: u32,
    polls: u32,
}

impl Http for LoopbackHttp {
    fn configure(&mut self, _config: &ExchangeConfig) -> Result<(), Status> {
        Ok(())
    }

    fn request(&mut self, _token: &mut OperationToken<'_>) -> Result<(), Status> {
        self.polls = 0;
        Ok(())
    }

    fn response(&mut self, _token: &mut OperationToken<'_>) -> Result<(), Status> {
        self.polls = 0;
        Ok(())
    }

    fn cancel(&mut self, _token: &mut OperationToken<'_>) -> Result<(), Status> {
        Ok(())
    }

    fn poll(&mut self, token: &mut OperationToken<'_>) -> Result<(), Status> {
        self.polls += 1;
        if self.polls < self.polls_to_complete {
            return Ok(());
        }
        if let Some(message) = token.response_message_mut() {
            message.body_mut()[..PAYLOAD.len()].copy_from_slice(PAYLOAD);
            message.set_body_length(PAYLOAD.len());
            message.status_code = StatusCode::SUCCESS;
        }
        token.complete(Ok(()));
        Ok(())
    }
}

/// Never crosses a second, so waits end only on completion.
struct FrozenClock;

impl Clock for FrozenClock {
    fn now(&mut self) -> Result<Time, Status> {
        Ok(Time::default())
    }
}

fn client(polls_to_complete: u32) -> Client<LoopbackBinding, InlinePool<BODY_CAPACITY>, FrozenClock> {
    Client::new(
        LoopbackBinding { polls_to_complete },
        InlinePool::new(),
        FrozenClock,
    )
}

pub fn bench_exchange(c: &mut Criterion) {
    let mut group = c.benchmark_group("exchange");
    let request = Request::binary_golf().expect("request fits");
    group.throughput(Throughput::Bytes(PAYLOAD.len() as u64));
    group.bench_function("first_poll", |b| {
        b.iter_batched_ref(
            || client(1),
            |client| {
                client.exchange(0, &request).expect("exchange succeeds");
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

pub fn bench_exchange_slow_stack(c: &mut Criterion) {
    let mut group = c.benchmark_group("exchange");
    let request = Request::binary_golf().expect("request fits");
    group.throughput(Throughput::Bytes(PAYLOAD.len() as u64));
    group.bench_function("hundred_polls", |b| {
        b.iter_batched_ref(
            || client(100),
            |client| {
                client.exchange(0, &request).expect("exchange succeeds");
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

pub fn bench_options_from_json(c: &mut Criterion) {
    let json = br#"{"http_version":"http10","ipv6":false,"local_port":8080,"request_wait_ticks":3}"#;
    c.bench_function("options_from_json", |b| {
        b.iter(|| Options::from_json(json).expect("options parse"))
    });
}
